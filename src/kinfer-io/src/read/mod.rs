mod kinship_reader;
pub use kinship_reader::{KinshipReader, KinshipReaderError};

mod sex_panel_reader;
pub use sex_panel_reader::{SexPanelReader, SexPanelReaderError};
