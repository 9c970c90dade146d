use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use super::strategy::MotionStrategy;

/// Thread-safe registry of comparison strategies.
///
/// Strategies are wrapped in `Mutex` because `MotionStrategy::evaluate`
/// takes `&mut self`.
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<Mutex<dyn MotionStrategy>>>,
    default_name: Option<String>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
            default_name: None,
        }
    }

    /// Register a strategy. The first registered strategy becomes the default.
    pub fn register<S: MotionStrategy + 'static>(&mut self, strategy: S) {
        let name = strategy.name().to_string();
        if self.default_name.is_none() {
            self.default_name = Some(name.clone());
        }
        self.strategies.insert(name, Arc::new(Mutex::new(strategy)));
    }

    /// Set the default strategy by name.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.strategies.contains_key(name) {
            return Err(anyhow!("strategy '{}' not registered", name));
        }
        self.default_name = Some(name.to_string());
        Ok(())
    }

    /// Get a strategy by name.
    pub fn get(&self, name: &str) -> Option<Arc<Mutex<dyn MotionStrategy>>> {
        self.strategies.get(name).cloned()
    }

    /// Get the default strategy.
    pub fn default_strategy(&self) -> Option<Arc<Mutex<dyn MotionStrategy>>> {
        self.default_name.as_ref().and_then(|name| self.get(name))
    }

    /// List registered strategy names.
    pub fn list(&self) -> Vec<String> {
        self.strategies.keys().cloned().collect()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
