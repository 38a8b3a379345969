//! GPIO 门面运行配置

/// 低优先级和中优先级中断（ESP_INTR_FLAG_LOWMED）
pub const ESP_INTR_FLAG_LOWMED: i32 = 0x0E;

/// 两步驱动调用（设置中断、关闭中断）的失败处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelegatePolicy {
    /// 第一步失败就返回，不再执行第二步
    #[default]
    ShortCircuit,
    /// 两步都执行，返回最先出现的错误
    BestEffort,
}

/// GPIO 门面配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioConfig {
    /// 成功操作后是否输出诊断日志
    pub debug: bool,
    /// 两步驱动调用的策略
    pub policy: DelegatePolicy,
    /// 安装 ISR 服务时使用的中断分配标志
    pub isr_flags: i32,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            debug: false,
            policy: DelegatePolicy::ShortCircuit,
            isr_flags: ESP_INTR_FLAG_LOWMED,
        }
    }
}

impl GpioConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置是否输出诊断日志
    pub fn debug(mut self, enable: bool) -> Self {
        self.debug = enable;
        self
    }

    /// 设置两步驱动调用的策略
    pub fn policy(mut self, policy: DelegatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 设置 ISR 服务的中断分配标志
    pub fn isr_flags(mut self, flags: i32) -> Self {
        self.isr_flags = flags;
        self
    }
}
