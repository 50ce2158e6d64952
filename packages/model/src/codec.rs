//! # Document Codec
//!
//! The engine never reads or writes bytes itself. A codec turns a stream
//! into a [`UiMapDocument`] and back; the loaded tree is trusted to already
//! satisfy the sibling-uniqueness invariants.

use std::io::{Read, Write};

use crate::error::CodecResult;
use crate::model::UiMapDocument;

/// Load/save boundary for UI map documents
pub trait DocumentCodec {
    fn load(&self, reader: &mut dyn Read) -> CodecResult<UiMapDocument>;

    fn save(&self, doc: &UiMapDocument, writer: &mut dyn Write) -> CodecResult<()>;
}

/// JSON representation of a document
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pub compact: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentCodec for JsonCodec {
    fn load(&self, reader: &mut dyn Read) -> CodecResult<UiMapDocument> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn save(&self, doc: &UiMapDocument, writer: &mut dyn Write) -> CodecResult<()> {
        if self.compact {
            serde_json::to_writer(&mut *writer, doc)?;
        } else {
            serde_json::to_writer_pretty(&mut *writer, doc)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Parse a document from JSON text
pub fn parse(source: &str) -> CodecResult<UiMapDocument> {
    JsonCodec::new().load(&mut source.as_bytes())
}

/// Serialize a document to pretty-printed JSON text
pub fn serialize(doc: &UiMapDocument) -> CodecResult<String> {
    let mut out = Vec::new();
    JsonCodec::new().save(doc, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
