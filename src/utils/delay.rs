#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::delay::FreeRtos;

/// Cooperative pause used between ADC samples and between logged rows.
pub trait Delay {
    /// Blocks the current task for `ms` milliseconds, yielding the processor.
    fn delay_ms(&mut self, ms: u32);
}

/// Delay backed by the scheduler of the running platform. On the ESP32 it
/// yields to FreeRTOS, elsewhere it sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskDelay;

impl Delay for TaskDelay {
    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms)
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64))
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Delay that never blocks and remembers every requested pause.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingDelay {
    pub pauses: Vec<u32>,
}

#[cfg(test)]
impl Delay for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.pauses.push(ms)
    }
}
