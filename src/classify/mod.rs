pub mod signals;

pub use signals::{Classifier, SignalPolicy};
