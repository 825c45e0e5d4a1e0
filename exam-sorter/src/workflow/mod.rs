//! Classification workflow

pub mod classifier;

pub use classifier::{Classifier, Collaborators};
