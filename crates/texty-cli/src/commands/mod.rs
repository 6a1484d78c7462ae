pub mod add;
pub mod export;
pub mod init;
pub mod list;
pub mod mark;
pub mod new;
pub mod normalize;
pub mod pick;
pub mod set_default;
pub mod stats;
