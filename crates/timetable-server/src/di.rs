//! Dependency injection module using Shaku.
//!
//! `TimetableModule` owns one instance of every component: the database
//! pool, both repositories, the cache manager, the request counter, the
//! external feed client and the two services.

use std::sync::Arc;
use timetable_config::AppConfig;
use timetable_core::{module, HasComponent, TimetableResult};
use timetable_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, GroupRepository,
    MySqlGroupRepository, MySqlScheduleRepository, ScheduleRepository,
};
use timetable_service::{
    BsuirScheduleClient, CacheManager, CacheManagerInterface, GroupService, GroupServiceComponent,
    RequestCounter, RequestCounterInterface, ScheduleFeedClient, ScheduleService,
    ScheduleServiceComponent,
};
use tracing::info;

module! {
    pub TimetableModule {
        components = [
            DatabasePool,
            MySqlGroupRepository,
            MySqlScheduleRepository,
            CacheManager,
            RequestCounter,
            BsuirScheduleClient,
            GroupServiceComponent,
            ScheduleServiceComponent,
        ],
        providers = [],
    }
}

/// Connects to the database and builds the module.
pub async fn build_timetable_module(config: &AppConfig) -> TimetableResult<Arc<TimetableModule>> {
    let db_pool = DatabasePool::connect(&config.database).await?;
    build_module_with_pool(db_pool, config)
}

/// Builds the module around an existing pool.
pub fn build_module_with_pool(
    db_pool: DatabasePool,
    config: &AppConfig,
) -> TimetableResult<Arc<TimetableModule>> {
    let module = TimetableModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<CacheManager>(CacheManager::parameters(&config.cache))
        .with_component_parameters::<BsuirScheduleClient>(BsuirScheduleClient::build_parameters(
            &config.external_api,
        )?)
        .with_component_parameters::<ScheduleServiceComponent>(
            ScheduleServiceComponent::parameters(&config.external_api)?,
        )
        .build();

    info!(
        "Timetable module built (cache capacity {}, semester start {})",
        config.cache.capacity, config.external_api.semester_start
    );
    Ok(Arc::new(module))
}

/// Resolves the services from a module.
pub trait ServiceResolver {
    fn group_service(&self) -> Arc<dyn GroupService>;

    fn schedule_service(&self) -> Arc<dyn ScheduleService>;

    fn request_counter(&self) -> Arc<dyn RequestCounterInterface>;
}

impl ServiceResolver for TimetableModule {
    fn group_service(&self) -> Arc<dyn GroupService> {
        self.resolve()
    }

    fn schedule_service(&self) -> Arc<dyn ScheduleService> {
        self.resolve()
    }

    fn request_counter(&self) -> Arc<dyn RequestCounterInterface> {
        self.resolve()
    }
}

/// Resolves the database pool.
pub trait DatabaseResolver {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for TimetableModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}

/// Resolves the repositories.
pub trait RepositoryResolver {
    fn group_repository(&self) -> Arc<dyn GroupRepository>;

    fn schedule_repository(&self) -> Arc<dyn ScheduleRepository>;
}

impl RepositoryResolver for TimetableModule {
    fn group_repository(&self) -> Arc<dyn GroupRepository> {
        self.resolve()
    }

    fn schedule_repository(&self) -> Arc<dyn ScheduleRepository> {
        self.resolve()
    }
}

/// Resolves the cache manager and the external feed client.
pub trait InfrastructureResolver {
    fn cache_manager(&self) -> Arc<dyn CacheManagerInterface>;

    fn feed_client(&self) -> Arc<dyn ScheduleFeedClient>;
}

impl InfrastructureResolver for TimetableModule {
    fn cache_manager(&self) -> Arc<dyn CacheManagerInterface> {
        self.resolve()
    }

    fn feed_client(&self) -> Arc<dyn ScheduleFeedClient> {
        self.resolve()
    }
}
