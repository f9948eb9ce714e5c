use crate::events::AppEvent;
use async_channel::Sender;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulation {
    pub maximum: i32,
    pub step: i32,
    pub interval: Duration,
}

/// Next synthetic value: climbs by `step` up to `maximum`, then restarts at 0.
pub fn next_value(current: i32, step: i32, maximum: i32) -> i32 {
    if current >= maximum {
        0
    } else {
        current.saturating_add(step.max(1)).min(maximum)
    }
}

pub async fn run_simulation(tx: Sender<AppEvent>, sim: Simulation) {
    if sim.maximum <= 0 {
        log::info!("No maximum set, simulation leaves the ring spinning");
        return;
    }

    let mut ticker = tokio::time::interval(sim.interval.max(Duration::from_millis(1)));
    let mut value = 0;
    loop {
        ticker.tick().await;
        value = next_value(value, sim.step, sim.maximum);
        if tx.send(AppEvent::SetValue(value)).await.is_err() {
            break;
        }
    }
}
