use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct SystemStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
}

/// Logs elapsed time (and, with the `cli` feature, process memory) for each
/// batch phase.
pub struct BatchMonitor {
    enabled: bool,
    start_time: Instant,
    phase_start: Mutex<Instant>,
    #[cfg(feature = "cli")]
    system: Option<Mutex<(System, Pid)>>,
    #[cfg(feature = "cli")]
    peak_memory: Mutex<u64>,
}

impl BatchMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            start_time: now,
            phase_start: Mutex::new(now),
            #[cfg(feature = "cli")]
            system: if enabled { Self::init_system() } else { None },
            #[cfg(feature = "cli")]
            peak_memory: Mutex::new(0),
        }
    }

    #[cfg(feature = "cli")]
    fn init_system() -> Option<Mutex<(System, Pid)>> {
        let pid = sysinfo::get_current_pid().ok()?;
        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();
        Some(Mutex::new((system, pid)))
    }

    #[cfg(feature = "cli")]
    pub fn system_stats(&self) -> Option<SystemStats> {
        let mut guard = self.system.as_ref()?.lock().ok()?;
        let (system, pid) = &mut *guard;
        system.refresh_all();

        let process = system.process(*pid)?;
        let memory_mb = process.memory() / 1024 / 1024;

        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        Some(SystemStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            peak_memory_mb: *peak,
        })
    }

    /// Logs the phase that just finished and restarts the phase clock.
    pub fn finish_phase(&self, phase: &str) {
        let elapsed = match self.phase_start.lock() {
            Ok(mut start) => {
                let elapsed = start.elapsed();
                *start = Instant::now();
                elapsed
            }
            Err(_) => return,
        };

        if self.enabled {
            self.log_phase(phase, elapsed);
        }
    }

    #[cfg(feature = "cli")]
    fn log_phase(&self, phase: &str, elapsed: Duration) {
        match self.system_stats() {
            Some(stats) => tracing::info!(
                "📊 {} - {:?}, CPU: {:.1}%, Memory: {}MB, Peak: {}MB",
                phase,
                elapsed,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb
            ),
            None => tracing::info!("📊 {} - {:?}", phase, elapsed),
        }
    }

    #[cfg(not(feature = "cli"))]
    fn log_phase(&self, phase: &str, elapsed: Duration) {
        tracing::info!("📊 {} - {:?}", phase, elapsed);
    }

    pub fn log_final_stats(&self, succeeded: usize, failed: usize) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Succeeded: {}, Failed: {}",
            self.start_time.elapsed(),
            succeeded,
            failed
        );
    }
}

impl Default for BatchMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
