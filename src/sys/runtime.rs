use crate::events::AppEvent;
use crate::sys::simulate::Simulation;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

#[derive(Debug, Clone, Default)]
pub struct Services {
    pub watch_config: bool,
    pub stdin_control: bool,
    pub simulation: Option<Simulation>,
}

pub fn start_background_services(tx: Sender<AppEvent>, services: Services) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            if services.watch_config {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            if services.stdin_control {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::control::run_stdin_control(tx).await;
                });
            }

            if let Some(sim) = services.simulation {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::simulate::run_simulation(tx, sim).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}
