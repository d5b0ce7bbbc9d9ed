mod launcher;
pub use launcher::Launcher;

mod transport;
pub use transport::Transport;
