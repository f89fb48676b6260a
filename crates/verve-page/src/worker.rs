//! Offline worker registrations
//!
//! Book-keeping for service worker scripts the page asks to install. The
//! host decides what a registration actually does; the page only records
//! scope ownership.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker script must be a root-relative path: {0}")]
    InvalidScript(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRegistration {
    pub script_url: String,
    /// Directory prefix this worker controls.
    pub scope: String,
}

#[derive(Debug, Default)]
pub struct WorkerRegistry {
    registrations: Vec<WorkerRegistration>,
}

impl WorkerRegistry {
    /// Register a worker script, scoped to its directory. Re-registering
    /// the same scope replaces the previous script.
    pub fn register(&mut self, script_url: &str) -> Result<WorkerRegistration, WorkerError> {
        if !script_url.starts_with('/') {
            return Err(WorkerError::InvalidScript(script_url.to_string()));
        }
        let cut = script_url.rfind('/').unwrap_or(0);
        let registration = WorkerRegistration {
            script_url: script_url.to_string(),
            scope: script_url[..cut + 1].to_string(),
        };
        self.registrations.retain(|r| r.scope != registration.scope);
        self.registrations.push(registration.clone());
        Ok(registration)
    }

    /// The registration controlling a path, preferring the longest scope.
    pub fn registration_for(&self, path: &str) -> Option<&WorkerRegistration> {
        self.registrations
            .iter()
            .filter(|r| path.starts_with(&r.scope))
            .max_by_key(|r| r.scope.len())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_scopes_to_directory() {
        let mut registry = WorkerRegistry::default();
        let reg = registry.register("/sw.js").unwrap();
        assert_eq!(reg.scope, "/");
        assert_eq!(reg.script_url, "/sw.js");
    }

    #[test]
    fn test_relative_script_rejected() {
        let mut registry = WorkerRegistry::default();
        assert!(registry.register("sw.js").is_err());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_longest_scope_wins() {
        let mut registry = WorkerRegistry::default();
        registry.register("/sw.js").unwrap();
        registry.register("/app/worker.js").unwrap();

        let reg = registry.registration_for("/app/page.html").unwrap();
        assert_eq!(reg.script_url, "/app/worker.js");
        let reg = registry.registration_for("/index.html").unwrap();
        assert_eq!(reg.script_url, "/sw.js");
    }

    #[test]
    fn test_reregister_replaces_scope() {
        let mut registry = WorkerRegistry::default();
        registry.register("/sw.js").unwrap();
        registry.register("/sw-v2.js").unwrap();
        assert_eq!(registry.len(), 1);
        let reg = registry.registration_for("/").unwrap();
        assert_eq!(reg.script_url, "/sw-v2.js");
    }
}
