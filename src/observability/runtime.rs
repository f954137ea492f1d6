//! Periodic process, runtime and pool gauges.
//!
//! Sampled on the sampler's own schedule (default 30s), never on the
//! request path.

use std::sync::Arc;
use std::time::Duration;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tokio::sync::broadcast;
use tokio::time;

use crate::db::DataSource;
use crate::observability::metrics;

/// Background sampler for process and pool gauges.
pub struct RuntimeSampler {
    source: Arc<dyn DataSource>,
    interval: Duration,
}

impl RuntimeSampler {
    pub fn new(source: Arc<dyn DataSource>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Sample on a fixed ticker until the shutdown signal arrives.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "runtime sampler starting"
        );

        let mut ticker = time::interval(self.interval);
        let mut system = System::new();
        let pid = Pid::from_u32(std::process::id());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sample(&mut system, pid);
                }
                _ = shutdown.recv() => {
                    tracing::info!("runtime sampler received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    fn sample(&self, system: &mut System, pid: Pid) {
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::new().with_memory(),
        );
        if let Some(process) = system.process(pid) {
            metrics::set_process_memory(process.memory(), process.virtual_memory());
        }

        let cpus = std::thread::available_parallelism().map_or(0, |n| n.get());
        metrics::set_logical_cpus(cpus);

        let rt = tokio::runtime::Handle::current().metrics();
        metrics::set_runtime_tasks(rt.num_alive_tasks(), rt.num_workers());

        metrics::set_pool_stats(self.source.stats());
    }
}
