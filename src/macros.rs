//! 日志宏
//!
//! 提供按调试开关输出诊断日志的宏

/// 调试开关打开时输出一条 info 级别的 GPIO 日志
///
/// # 示例
/// ```
/// let debug = true;
/// esp32_gpio::gpio_debug!(debug, "GPIO = {} Value Set = {}", 2, 1);
/// ```
#[macro_export]
macro_rules! gpio_debug {
    ($enabled:expr, $($arg:tt)+) => {{
        if $enabled {
            $crate::__log::info!(target: $crate::gpio::LOG_TARGET, $($arg)+);
        }
    }};
}
