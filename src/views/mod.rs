pub mod rain;
pub mod terminal;

pub use rain::MatrixRain;
pub use terminal::TerminalView;
