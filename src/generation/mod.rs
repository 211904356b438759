pub mod builder;
pub mod model;

pub use builder::ContentBuilder;
pub use model::{
    Candidate, Content, FinishReason, GenerateContentRequest, GenerationConfig,
    GenerationResponse, GroundingChunk, GroundingMetadata, GroundingSource, GroundingSupport,
    Part, Role, SearchEntryPoint, Segment, ThinkingConfig, UsageMetadata,
};
