pub mod device;

pub use device::DeviceRecord;
