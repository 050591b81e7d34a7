mod canned;
mod openai;
mod traits;

pub use canned::CannedGenerator;
pub use openai::OpenAiGenerator;
pub use traits::{GenConfig, GenError, Generator, GeneratorKind};

/// Create a generator by kind
pub fn create_generator(kind: GeneratorKind, config: GenConfig) -> Box<dyn Generator> {
    match kind {
        GeneratorKind::OpenAi => Box::new(OpenAiGenerator::new(config)),
        GeneratorKind::Canned => Box::new(CannedGenerator::new()),
    }
}
