pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AttachSource, ChatSurface, ChatTransport, ClipboardItem, CompleteChatUseCase,
    CompletionProvider, SubmitOutcome, SurfaceState, DEFAULT_MODEL, FALLBACK_REPLY,
};

pub use cli::Commands;

pub use connector::{
    HttpGatewayClient, MockMode, MockProvider, OpenAiClient, DEFAULT_GATEWAY_URL,
};

pub use domain::{
    build_prompt, AttachedFile, ChatSettings, CompletionRequest, CompletionResponse, DomainError,
    EncodedFile, Message, ModelPreset, Role, Transcript, DEFAULT_GREETING, GATEWAY_ERROR_MESSAGE,
};
