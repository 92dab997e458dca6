use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// 登录入口所在的页面（原小程序的"我的"Tab）
pub const LOGIN_PAGE: &str = "/pages/profile/index";

/// 会话过期后延迟跳转的等待时间
pub const REDIRECT_DELAY_MS: u64 = 2000;

/// 提示的默认展示时长
pub const TOAST_DURATION_MS: u64 = 2000;

/// 数据层对外发出的 UI 事件
///
/// 客户端只发事件，不直接操作导航或弹窗，由宿主侧消费
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// 短暂提示，自动消失
    Toast { message: String, duration_ms: u64 },

    /// 延迟跳转到登录入口页，发送方不等待跳转完成
    RedirectToLogin { target: String, delay_ms: u64 },
}

pub type EventSender = UnboundedSender<ClientEvent>;
pub type EventReceiver = UnboundedReceiver<ClientEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
