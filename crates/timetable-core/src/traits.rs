//! Core traits shared across layers.

use async_trait::async_trait;

/// Trait for entities with a unique identifier.
pub trait Entity<ID> {
    /// Returns the entity's unique identifier.
    fn id(&self) -> &ID;
}

/// Marker trait for service layer components.
pub trait Service: Send + Sync {}

/// Trait for health checks.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Returns the name of this health check.
    fn name(&self) -> &str;

    /// Performs the health check.
    async fn check(&self) -> HealthStatus;
}

/// Health check status.
#[derive(Debug, Clone)]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is degraded but functional.
    Degraded(String),
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns true if the status is unhealthy.
    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysUp;

    #[async_trait]
    impl HealthCheck for AlwaysUp {
        fn name(&self) -> &str {
            "always-up"
        }

        async fn check(&self) -> HealthStatus {
            HealthStatus::Healthy
        }
    }

    #[tokio::test]
    async fn test_health_check_trait_object() {
        let check: Box<dyn HealthCheck> = Box::new(AlwaysUp);
        assert_eq!(check.name(), "always-up");
        assert!(check.check().await.is_healthy());
    }

    #[test]
    fn test_health_status_predicates() {
        assert!(!HealthStatus::Degraded("slow".into()).is_healthy());
        assert!(!HealthStatus::Degraded("slow".into()).is_unhealthy());
        assert!(HealthStatus::Unhealthy("down".into()).is_unhealthy());
    }
}
