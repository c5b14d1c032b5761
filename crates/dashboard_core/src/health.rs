use std::collections::BTreeMap;

use crate::catalog::{self, SERVICES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

impl HealthStatus {
    pub fn badge(self) -> &'static str {
        match self {
            HealthStatus::Checking => "Vérification...",
            HealthStatus::Online => "En ligne",
            HealthStatus::Offline => "Hors ligne",
        }
    }
}

/// One status per configured service, never more, never fewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HealthBoard {
    statuses: BTreeMap<&'static str, HealthStatus>,
}

impl Default for HealthBoard {
    fn default() -> Self {
        Self {
            statuses: SERVICES
                .iter()
                .map(|service| (service.key, HealthStatus::Checking))
                .collect(),
        }
    }
}

impl HealthBoard {
    /// Returns false for a key that is not a configured service.
    pub(crate) fn record(&mut self, service: &str, online: bool) -> bool {
        let Some(descriptor) = catalog::service(service) else {
            return false;
        };
        let status = if online {
            HealthStatus::Online
        } else {
            HealthStatus::Offline
        };
        self.statuses.insert(descriptor.key, status);
        true
    }

    pub(crate) fn status(&self, service: &str) -> HealthStatus {
        self.statuses.get(service).copied().unwrap_or_default()
    }

    pub(crate) fn online_count(&self) -> usize {
        self.statuses
            .values()
            .filter(|status| **status == HealthStatus::Online)
            .count()
    }

    pub(crate) fn len(&self) -> usize {
        self.statuses.len()
    }
}
