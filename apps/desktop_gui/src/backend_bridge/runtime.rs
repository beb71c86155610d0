//! Tokio runtime owned by the window for the lifetime of the app.

use tokio::runtime::{Builder, Handle, Runtime};

pub struct BackendRuntime {
    runtime: Runtime,
}

impl BackendRuntime {
    pub fn launch() -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("activity-report")
            .enable_all()
            .build()?;
        Ok(Self { runtime })
    }

    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }
}
