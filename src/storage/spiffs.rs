/// Mount settings of the SPIFFS partition
/// - `base_path`: Mount point in the virtual filesystem, files live under it
/// - `partition_label`: Partition to mount, `None` for the default "spiffs" one
/// - `max_files`: Files that can be open at the same time
/// - `format_if_mount_failed`: Format the partition when it cannot be mounted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpiffsConfig {
    pub base_path: String,
    pub partition_label: Option<String>,
    pub max_files: usize,
    pub format_if_mount_failed: bool,
}

impl Default for SpiffsConfig {
    fn default() -> Self {
        SpiffsConfig {
            base_path: String::from("/spiffs"),
            partition_label: None,
            max_files: 8,
            format_if_mount_failed: true,
        }
    }
}

impl SpiffsConfig {
    /// Path of `file_name` inside the mount point
    pub fn file_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), file_name)
    }
}

/// Size of the mounted partition, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiffsInfo {
    pub total: usize,
    pub used: usize,
}

/// Enums the different errors possible when mounting the filesystem. Codes are
/// the raw `esp_err_t` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpiffsError {
    InvalidConfig,
    MountFailed(i32),
    InfoFailed(i32),
    UnmountFailed(i32),
}

#[cfg(target_os = "espidf")]
pub use self::esp::*;

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_svc::sys::{
        esp_spiffs_info, esp_vfs_spiffs_conf_t, esp_vfs_spiffs_register,
        esp_vfs_spiffs_unregister, EspError,
    };
    use std::{ffi::CString, ptr};

    use super::{SpiffsConfig, SpiffsError, SpiffsInfo};

    /// A mounted SPIFFS partition. Unmounted by `unmount` or when dropped.
    pub struct MountedSpiffs {
        partition_label: Option<CString>,
        info: SpiffsInfo,
        mounted: bool,
    }

    fn label_ptr(label: &Option<CString>) -> *const std::ffi::c_char {
        label.as_ref().map_or(ptr::null(), |label| label.as_ptr())
    }

    /// Registers the SPIFFS partition in the VFS under `config.base_path`, so
    /// it can be used through `std::fs`.
    ///
    /// # Errors
    ///
    /// - `SpiffsError::InvalidConfig`: If a path or label contains a nul byte
    /// - `SpiffsError::MountFailed`: If ESP-IDF could not mount (or format) the partition
    /// - `SpiffsError::InfoFailed`: If the partition size could not be queried
    pub fn mount(config: &SpiffsConfig) -> Result<MountedSpiffs, SpiffsError> {
        let base_path =
            CString::new(config.base_path.as_str()).map_err(|_| SpiffsError::InvalidConfig)?;
        let partition_label = config
            .partition_label
            .as_deref()
            .map(CString::new)
            .transpose()
            .map_err(|_| SpiffsError::InvalidConfig)?;

        let conf = esp_vfs_spiffs_conf_t {
            base_path: base_path.as_ptr(),
            partition_label: label_ptr(&partition_label),
            max_files: config.max_files,
            format_if_mount_failed: config.format_if_mount_failed,
        };
        EspError::convert(unsafe { esp_vfs_spiffs_register(&conf) })
            .map_err(|err| SpiffsError::MountFailed(err.code()))?;

        let mut mounted = MountedSpiffs {
            partition_label,
            info: SpiffsInfo { total: 0, used: 0 },
            mounted: true,
        };
        let (mut total, mut used) = (0_usize, 0_usize);
        EspError::convert(unsafe {
            esp_spiffs_info(label_ptr(&mounted.partition_label), &mut total, &mut used)
        })
        .map_err(|err| SpiffsError::InfoFailed(err.code()))?;
        mounted.info = SpiffsInfo { total, used };

        log::info!("SPIFFS mounted. total={total} bytes, used={used} bytes");
        Ok(mounted)
    }

    impl MountedSpiffs {
        pub fn info(&self) -> SpiffsInfo {
            self.info
        }

        /// Unregisters the partition from the VFS.
        ///
        /// # Errors
        ///
        /// - `SpiffsError::UnmountFailed`: If ESP-IDF refused to unregister it
        pub fn unmount(mut self) -> Result<(), SpiffsError> {
            self.mounted = false;
            EspError::convert(unsafe {
                esp_vfs_spiffs_unregister(label_ptr(&self.partition_label))
            })
            .map_err(|err| SpiffsError::UnmountFailed(err.code()))
        }
    }

    impl Drop for MountedSpiffs {
        fn drop(&mut self) {
            if self.mounted {
                unsafe { esp_vfs_spiffs_unregister(label_ptr(&self.partition_label)) };
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_default_mounts_at_spiffs() {
        let config = SpiffsConfig::default();
        assert_eq!(config.base_path, "/spiffs");
        assert_eq!(config.partition_label, None);
        assert_eq!(config.max_files, 8);
        assert!(config.format_if_mount_failed);
    }

    #[test]
    fn test1_file_path_joins_mount_point() {
        let config = SpiffsConfig::default();
        assert_eq!(config.file_path("data.csv"), "/spiffs/data.csv");
        let config = SpiffsConfig {
            base_path: String::from("/flash/"),
            ..SpiffsConfig::default()
        };
        assert_eq!(config.file_path("data.csv"), "/flash/data.csv");
    }
}
