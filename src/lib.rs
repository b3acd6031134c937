//! zcmdr - 双栏终端文件管理器的核心库
//!
//! 模块结构：
//! - core: 命令与按键
//! - models: 数据模型（LineBuffer, PaneListing, Side）
//! - kernel: 状态/Action/Store，行级 diff 引擎，目录比较与同步，服务层
//! - app: 应用层（Workbench, UiTheme），需要 `tui` feature
//! - tui: 终端接管与恢复，需要 `tui` feature

#[cfg(feature = "tui")]
pub mod app;
pub mod core;
pub mod kernel;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;
