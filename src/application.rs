//! Wiring of repositories into the services the HTTP surface calls.

use crate::config::Config;
use crate::identity::{
    adapters::memory::{InMemorySessionStore, InMemoryUserRepository},
    ports::{SessionResolver, UserRepository},
    services::UserDirectoryService,
};
use crate::project::{
    adapters::memory::InMemoryProjectRepository, ports::ProjectRepository,
    services::ProjectCatalogService,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository, ports::TaskRepository,
    services::TaskLifecycleService,
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// Services shared by every request handler.
pub trait ApplicationServices: Clone + Send + Sync + 'static {
    /// User store.
    type Users: UserRepository + 'static;
    /// Project store.
    type Projects: ProjectRepository + 'static;
    /// Task store.
    type Tasks: TaskRepository + 'static;
    /// Bearer-token resolver.
    type Sessions: SessionResolver + 'static;
    /// Time source.
    type Clock: Clock + Send + Sync + 'static;

    /// Returns the loaded configuration.
    fn config(&self) -> &Config;

    /// Returns the user directory service.
    fn users(&self) -> &UserDirectoryService<Self::Users, Self::Clock>;

    /// Returns the project catalog service.
    fn projects(&self) -> &ProjectCatalogService<Self::Projects, Self::Tasks, Self::Clock>;

    /// Returns the task lifecycle service.
    fn tasks(&self) -> &TaskLifecycleService<Self::Tasks, Self::Projects, Self::Clock>;

    /// Returns the session resolver.
    fn sessions(&self) -> &Self::Sessions;
}

/// Concrete application built over one set of adapters.
pub struct Application<U, P, T, S, C>
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    S: SessionResolver + 'static,
    C: Clock + Send + Sync + 'static,
{
    config: Arc<Config>,
    users: Arc<UserDirectoryService<U, C>>,
    projects: Arc<ProjectCatalogService<P, T, C>>,
    tasks: Arc<TaskLifecycleService<T, P, C>>,
    sessions: Arc<S>,
}

/// Application backed entirely by in-memory adapters.
pub type InMemoryApplication = Application<
    InMemoryUserRepository,
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemorySessionStore,
    DefaultClock,
>;

/// Repositories an [`Application`] is assembled from.
pub struct Adapters<U, P, T, S, C> {
    /// User store.
    pub users: Arc<U>,
    /// Project store.
    pub projects: Arc<P>,
    /// Task store.
    pub tasks: Arc<T>,
    /// Bearer-token resolver.
    pub sessions: Arc<S>,
    /// Time source.
    pub clock: Arc<C>,
}

impl<U, P, T, S, C> Application<U, P, T, S, C>
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    S: SessionResolver + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Builds every service over the given adapters.
    #[must_use]
    pub fn new(config: Config, adapters: Adapters<U, P, T, S, C>) -> Self {
        let Adapters {
            users,
            projects,
            tasks,
            sessions,
            clock,
        } = adapters;
        Self {
            config: Arc::new(config),
            users: Arc::new(UserDirectoryService::new(users, Arc::clone(&clock))),
            projects: Arc::new(ProjectCatalogService::new(
                Arc::clone(&projects),
                Arc::clone(&tasks),
                Arc::clone(&clock),
            )),
            tasks: Arc::new(TaskLifecycleService::new(tasks, projects, clock)),
            sessions,
        }
    }
}

impl InMemoryApplication {
    /// Builds an application over empty in-memory stores.
    ///
    /// The session store is returned alongside so callers can issue tokens.
    #[must_use]
    pub fn in_memory(config: Config) -> (Self, Arc<InMemorySessionStore>) {
        let sessions = Arc::new(InMemorySessionStore::new());
        let application = Self::new(
            config,
            Adapters {
                users: Arc::new(InMemoryUserRepository::new()),
                projects: Arc::new(InMemoryProjectRepository::new()),
                tasks: Arc::new(InMemoryTaskRepository::new()),
                sessions: Arc::clone(&sessions),
                clock: Arc::new(DefaultClock),
            },
        );
        (application, sessions)
    }
}

impl<U, P, T, S, C> Clone for Application<U, P, T, S, C>
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    S: SessionResolver + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            users: Arc::clone(&self.users),
            projects: Arc::clone(&self.projects),
            tasks: Arc::clone(&self.tasks),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<U, P, T, S, C> ApplicationServices for Application<U, P, T, S, C>
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    S: SessionResolver + 'static,
    C: Clock + Send + Sync + 'static,
{
    type Users = U;
    type Projects = P;
    type Tasks = T;
    type Sessions = S;
    type Clock = C;

    fn config(&self) -> &Config {
        &self.config
    }

    fn users(&self) -> &UserDirectoryService<U, C> {
        &self.users
    }

    fn projects(&self) -> &ProjectCatalogService<P, T, C> {
        &self.projects
    }

    fn tasks(&self) -> &TaskLifecycleService<T, P, C> {
        &self.tasks
    }

    fn sessions(&self) -> &S {
        &self.sessions
    }
}
