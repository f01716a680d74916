pub mod envelope_mapper;

pub use envelope_mapper::EnvelopeMapper;
