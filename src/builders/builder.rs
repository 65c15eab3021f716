//! Constructor-argument staging shared by every whole-object flavor.

use crate::config::{active_config, DoublesConfig};
use crate::errors::Result;
use crate::reflection::ClassDef;
use crate::value::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// A flavor of double that can be built from a class.
pub trait Flavor: Sized {
    fn create(class: &Arc<ClassDef>, constructor_args: &[Value], config: &DoublesConfig)
        -> Result<Self>;
}

/// Stages constructor arguments and configuration, then builds `F`.
///
/// # Example
///
/// ```rust
/// use understudy::builders::mock;
/// use understudy::reflection::ClassDef;
/// use serde_json::json;
///
/// let class = ClassDef::builder("Clock")
///     .method("now", |_, _| Ok(json!(0)))
///     .build();
/// let clock = mock(&class).with_constructor_args([json!("UTC")]).create().unwrap();
/// assert!(clock.is_mock());
/// ```
#[derive(Debug, Clone)]
pub struct Builder<F> {
    class: Arc<ClassDef>,
    constructor_args: Vec<Value>,
    config: DoublesConfig,
    _flavor: PhantomData<fn() -> F>,
}

impl<F: Flavor> Builder<F> {
    /// Start a builder using the process-wide active configuration.
    pub fn new(class: &Arc<ClassDef>) -> Self {
        Self {
            class: Arc::clone(class),
            constructor_args: Vec::new(),
            config: active_config(),
            _flavor: PhantomData,
        }
    }

    /// Arguments used to instantiate the Original. None by default.
    pub fn with_constructor_args(mut self, args: impl IntoIterator<Item = Value>) -> Self {
        self.constructor_args = args.into_iter().collect();
        self
    }

    pub fn with_config(mut self, config: DoublesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn constructor_args(&self) -> &[Value] {
        &self.constructor_args
    }

    /// Instantiate the Original and wrap it.
    pub fn create(self) -> Result<F> {
        F::create(&self.class, &self.constructor_args, &self.config)
    }
}
