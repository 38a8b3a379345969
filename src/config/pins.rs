//! 引脚能力表与演示板引脚配置
//!
//! 能力表描述芯片上哪些 GPIO 存在、能否输出、能否上下拉

/// 芯片 GPIO 能力表
///
/// 每个掩码的第 n 位对应 GPIO n
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinCapabilities {
    valid: u64,
    output: u64,
    pull: u64,
}

/// GPIO 34 - 39 只能输入，也没有软件上拉/下拉
const ESP32_INPUT_ONLY: u64 = 0x3F << 34;

/// ESP32 的 GPIO 0 - 39，其中 24、28 - 31 不存在
///
/// 与 ESP-IDF v4.2 之后的 `SOC_GPIO_VALID_GPIO_MASK` 一致。GPIO20 只在
/// ESP32-PICO-V3 上引出，IDF v3.x 的 `GPIO_PIN_MUX_REG` 表会把它当作无效引脚。
const ESP32_VALID: u64 =
    0xFF_FFFF_FFFF & !((1 << 24) | (1 << 28) | (1 << 29) | (1 << 30) | (1 << 31));

impl PinCapabilities {
    /// ESP32 参考能力表
    pub const ESP32: PinCapabilities = PinCapabilities {
        valid: ESP32_VALID,
        output: ESP32_VALID & !ESP32_INPUT_ONLY,
        pull: ESP32_VALID & !ESP32_INPUT_ONLY,
    };

    /// 从掩码构造能力表，输出和上下拉掩码会被限制在合法掩码之内
    pub const fn from_masks(valid: u64, output: u64, pull: u64) -> Self {
        Self {
            valid,
            output: output & valid,
            pull: pull & valid,
        }
    }

    #[inline]
    fn has(mask: u64, pin: u8) -> bool {
        pin < 64 && mask & (1u64 << pin) != 0
    }

    pub fn is_valid(&self, pin: u8) -> bool {
        Self::has(self.valid, pin)
    }

    pub fn is_output_capable(&self, pin: u8) -> bool {
        Self::has(self.output, pin)
    }

    pub fn is_pull_capable(&self, pin: u8) -> bool {
        Self::has(self.pull, pin)
    }

    /// 按编号顺序列出所有合法引脚
    pub fn valid_pins(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..64).filter(move |&pin| self.is_valid(pin))
    }
}

impl Default for PinCapabilities {
    fn default() -> Self {
        Self::ESP32
    }
}

/// 演示板引脚配置
#[derive(Debug, Clone, Copy)]
pub struct PinConfig {
    /// 板载 LED (GPIO2)
    pub led: u8,

    /// BOOT 按键，低电平有效 (GPIO0)
    pub button: u8,

    /// 只能输入的模拟/传感器引脚 (GPIO36)
    pub sensor_input: u8,
}

/// 默认引脚配置
///
/// - LED: GPIO2
/// - 按键: GPIO0
/// - 传感器输入: GPIO36
pub const PIN_CONFIG: PinConfig = PinConfig {
    led: 2,
    button: 0,
    sensor_input: 36,
};

/// 验证引脚配置的有效性
///
/// # 参数
/// * `config` - 要验证的引脚配置
/// * `caps` - 芯片能力表
///
/// # 返回
/// * `Ok(())` - 配置有效
/// * `Err(String)` - 配置无效，包含错误信息
pub fn validate_config(config: &PinConfig, caps: &PinCapabilities) -> Result<(), String> {
    let pins = [config.led, config.button, config.sensor_input];

    // 检查是否有重复的引脚
    for i in 0..pins.len() {
        for j in (i + 1)..pins.len() {
            if pins[i] == pins[j] {
                return Err(format!("引脚 {} 被重复使用", pins[i]));
            }
        }
    }

    for &pin in &pins {
        if !caps.is_valid(pin) {
            let valid_pins: Vec<u8> = caps.valid_pins().collect();
            return Err(format!("引脚 {pin} 不是有效的 GPIO 引脚。有效引脚: {valid_pins:?}"));
        }
    }

    if !caps.is_output_capable(config.led) {
        return Err(format!("LED 引脚 {} 不能作为输出", config.led));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esp32_valid_pins() {
        let caps = PinCapabilities::ESP32;
        for pin in [0, 2, 19, 20, 21, 23, 25, 27, 32, 33, 34, 39] {
            assert!(caps.is_valid(pin), "GPIO{pin} 应该合法");
        }
        for pin in [24, 28, 29, 30, 31, 40, 63, 64, 255] {
            assert!(!caps.is_valid(pin), "GPIO{pin} 不应该合法");
        }
        assert_eq!(caps.valid_pins().count(), 35);
        // GPIO20 (ESP32-PICO-V3) 可以输出也可以上下拉
        assert!(caps.is_output_capable(20));
        assert!(caps.is_pull_capable(20));
    }

    #[test]
    fn test_esp32_input_only_range() {
        let caps = PinCapabilities::ESP32;
        for pin in 34..=39 {
            assert!(caps.is_valid(pin));
            assert!(!caps.is_output_capable(pin));
            assert!(!caps.is_pull_capable(pin));
        }
        assert!(caps.is_output_capable(33));
        assert!(caps.is_pull_capable(33));
        // 不存在的引脚也没有能力
        assert!(!caps.is_output_capable(24));
        assert!(!caps.is_pull_capable(24));
    }

    #[test]
    fn test_from_masks_clamps_to_valid() {
        let caps = PinCapabilities::from_masks(0b0111, 0b1111, 0b1001);
        assert!(caps.is_output_capable(2));
        assert!(!caps.is_output_capable(3));
        assert!(caps.is_pull_capable(0));
        assert!(!caps.is_pull_capable(3));
    }

    #[test]
    fn test_validate_config() {
        let caps = PinCapabilities::ESP32;
        assert!(validate_config(&PIN_CONFIG, &caps).is_ok());

        let duplicated = PinConfig { button: 2, ..PIN_CONFIG };
        assert!(validate_config(&duplicated, &caps).is_err());

        let missing = PinConfig { led: 24, ..PIN_CONFIG };
        assert!(validate_config(&missing, &caps).is_err());

        let input_led = PinConfig { led: 35, ..PIN_CONFIG };
        assert!(validate_config(&input_led, &caps).is_err());
    }
}
