pub mod builder;
pub mod chooser;

pub use builder::{ LabelSource, MissingVariant, PopupBuilder, PopupList, PopupNode };
pub use chooser::{ ChooserOutcome, PopupChooser, SelectorAction };
