pub mod model_size;
pub mod recognized_segment;
pub mod speaker_turn;
pub mod speech_recognizer;
pub mod transcript_document;
pub mod turn_builder;
