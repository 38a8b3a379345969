use thiserror::Error;

use super::types::Direction;

/// ESP-IDF 通用失败码
pub const ESP_FAIL: i32 = -1;
/// 参数错误
pub const ESP_ERR_INVALID_ARG: i32 = 0x102;
/// 状态错误，例如 ISR 服务重复安装或尚未安装
pub const ESP_ERR_INVALID_STATE: i32 = 0x103;

/// 底层驱动调用返回的失败
///
/// 只记录失败的调用和原始 `esp_err_t`，不做进一步解释
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("驱动调用 {op} 失败, code = {code:#x}")]
pub struct DriverError {
    pub op: &'static str,
    pub code: i32,
}

impl DriverError {
    pub fn new(op: &'static str, code: i32) -> Self {
        Self { op, code }
    }
}

/// GPIO 门面错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GpioError {
    #[error("无效的引脚编号: {0}")]
    InvalidPin(u8),

    #[error("引脚 {pin} 不支持方向 {direction}")]
    UnsupportedDirection { pin: u8, direction: Direction },

    #[error("引脚 {0} 不能作为输出")]
    NotOutputCapable(u8),

    #[error("引脚 {0} 没有软件上拉/下拉")]
    UnsupportedPull(u8),

    #[error(transparent)]
    Driver(#[from] DriverError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_converts() {
        let err: GpioError = DriverError::new("gpio_set_level", ESP_FAIL).into();
        assert_eq!(
            err,
            GpioError::Driver(DriverError {
                op: "gpio_set_level",
                code: -1
            })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(GpioError::InvalidPin(40).to_string(), "无效的引脚编号: 40");
        assert_eq!(
            GpioError::UnsupportedDirection {
                pin: 36,
                direction: Direction::Output
            }
            .to_string(),
            "引脚 36 不支持方向 output"
        );
        assert_eq!(
            DriverError::new("gpio_install_isr_service", ESP_ERR_INVALID_STATE).to_string(),
            "驱动调用 gpio_install_isr_service 失败, code = 0x103"
        );
    }
}
