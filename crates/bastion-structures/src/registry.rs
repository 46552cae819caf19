use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use bastion_world::CompoundTag;

use crate::piece::StructurePiece;

pub type PieceDecoder = fn(&CompoundTag) -> Box<dyn StructurePiece>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PieceDecodeError {
    MissingId,
    UnknownType(String),
}

impl fmt::Display for PieceDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceDecodeError::MissingId => write!(f, "piece record has no id"),
            PieceDecodeError::UnknownType(id) => write!(f, "unknown piece type '{id}'"),
        }
    }
}

impl Error for PieceDecodeError {}

/// Maps persisted type ids back to piece constructors.
#[derive(Default)]
pub struct PieceRegistry {
    decoders: HashMap<&'static str, PieceDecoder>,
}

impl PieceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, piece_type: &'static str, decoder: PieceDecoder) -> &mut Self {
        if self.decoders.insert(piece_type, decoder).is_some() {
            log::warn!(target: "structures", "piece type '{piece_type}' registered twice");
        }
        self
    }

    pub fn contains(&self, piece_type: &str) -> bool {
        self.decoders.contains_key(piece_type)
    }

    pub fn decode(&self, tag: &CompoundTag) -> Result<Box<dyn StructurePiece>, PieceDecodeError> {
        let id = tag.get_string("id").ok_or(PieceDecodeError::MissingId)?;
        let decoder = self
            .decoders
            .get(id)
            .ok_or_else(|| PieceDecodeError::UnknownType(id.to_string()))?;
        Ok(decoder(tag))
    }
}

impl fmt::Debug for PieceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.decoders.keys().collect();
        ids.sort();
        f.debug_struct("PieceRegistry").field("types", &ids).finish()
    }
}
