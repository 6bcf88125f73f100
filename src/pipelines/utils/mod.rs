//! Device placement for the trained emotion classifier.

use crate::core::ModelOptions;
use candle_core::{CudaDevice, Device};

/// Where the classifier weights should live.
#[derive(Debug, Clone, Default)]
pub enum DeviceRequest {
    /// First CUDA device when present, CPU otherwise.
    #[default]
    Auto,
    Cpu,
    /// A CUDA device by ordinal. Fails to resolve if it is missing.
    Cuda(usize),
    Explicit(Device),
}

impl DeviceRequest {
    pub fn resolve(&self) -> anyhow::Result<Device> {
        match self {
            DeviceRequest::Auto => Ok(cuda_or_cpu()),
            DeviceRequest::Cpu => Ok(Device::Cpu),
            DeviceRequest::Cuda(ordinal) => CudaDevice::new_with_stream(*ordinal)
                .map(Device::Cuda)
                .map_err(|e| anyhow::anyhow!("CUDA device {ordinal} unavailable: {e}")),
            DeviceRequest::Explicit(device) => Ok(device.clone()),
        }
    }
}

fn cuda_or_cpu() -> Device {
    match CudaDevice::new_with_stream(0) {
        Ok(cuda) => Device::Cuda(cuda),
        Err(err) => {
            tracing::debug!(%err, "no CUDA device, classifier runs on CPU");
            Device::Cpu
        }
    }
}

/// Device selection shared by builders that may load a classifier.
pub trait DeviceSelectable: Sized {
    fn device_request_mut(&mut self) -> &mut DeviceRequest;

    fn cpu(self) -> Self {
        self.with_device_request(DeviceRequest::Cpu)
    }

    fn cuda_device(self, ordinal: usize) -> Self {
        self.with_device_request(DeviceRequest::Cuda(ordinal))
    }

    fn device(self, device: Device) -> Self {
        self.with_device_request(DeviceRequest::Explicit(device))
    }

    fn with_device_request(mut self, request: DeviceRequest) -> Self {
        *self.device_request_mut() = request;
        self
    }
}

/// Models loaded onto different devices get different cache entries.
pub fn build_cache_key<O: ModelOptions>(options: &O, device: &Device) -> String {
    format!("{}@{:?}", options.cache_key(), device.location())
}
