//! Collaborator seams: module loading and dependency scanning.
//!
//! Classfile parsing and reference discovery live outside this crate. The
//! pipeline only consumes these traits; [`crate::ScanSnapshot`] implements
//! both from a recorded scan.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::{ArchiveId, DependencyResult, Module, Result};

/// Resolves archive paths into loaded modules.
pub trait ModuleFinder {
    /// Load every path. A module that declares its own descriptor is returned
    /// as such; rejecting it is the caller's decision.
    fn load_all(&self, paths: &[PathBuf]) -> Result<Vec<Module>>;
}

/// Scans modules for class-level references.
pub trait DependencyScanner {
    /// Scan only the publicly visible surface (exported API) of `modules`.
    fn scan_api_only(&mut self, modules: &[Arc<Module>]) -> Result<DependencyResult>;

    /// Scan every class of `modules`.
    fn scan_full(&mut self, modules: &[Arc<Module>]) -> Result<DependencyResult>;

    /// Stop attributing references to `module`. Called once per candidate,
    /// before its descriptor is synthesized.
    fn close(&mut self, _module: &ArchiveId) {}

    /// Release scanning resources. Called exactly once per pipeline run.
    fn release(&mut self);
}

impl<S: DependencyScanner + ?Sized> DependencyScanner for &mut S {
    fn scan_api_only(&mut self, modules: &[Arc<Module>]) -> Result<DependencyResult> {
        (**self).scan_api_only(modules)
    }

    fn scan_full(&mut self, modules: &[Arc<Module>]) -> Result<DependencyResult> {
        (**self).scan_full(modules)
    }

    fn close(&mut self, module: &ArchiveId) {
        (**self).close(module)
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Scoped access to a scanner that releases it exactly once on drop.
pub(crate) struct ScanSession<'a, S: DependencyScanner + ?Sized> {
    scanner: &'a mut S,
}

impl<'a, S: DependencyScanner + ?Sized> ScanSession<'a, S> {
    pub(crate) fn new(scanner: &'a mut S) -> Self {
        Self { scanner }
    }

    pub(crate) fn scanner(&mut self) -> &mut S {
        self.scanner
    }
}

impl<S: DependencyScanner + ?Sized> Drop for ScanSession<'_, S> {
    fn drop(&mut self) {
        debug!("releasing dependency scanner");
        self.scanner.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScanner {
        releases: usize,
    }

    impl DependencyScanner for CountingScanner {
        fn scan_api_only(&mut self, _: &[Arc<Module>]) -> Result<DependencyResult> {
            Ok(DependencyResult::new())
        }

        fn scan_full(&mut self, _: &[Arc<Module>]) -> Result<DependencyResult> {
            Err(crate::Error::InvalidInput("scan failed".to_string()))
        }

        fn release(&mut self) {
            self.releases += 1;
        }
    }

    #[test]
    fn test_session_releases_once_on_error_path() {
        let mut scanner = CountingScanner::default();
        {
            let mut session = ScanSession::new(&mut scanner);
            assert!(session.scanner().scan_full(&[]).is_err());
        }
        assert_eq!(scanner.releases, 1);
    }
}
