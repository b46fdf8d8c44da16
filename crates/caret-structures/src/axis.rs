use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Slice axis of a volume view.
///
/// Only the three orthogonal axes can be edited directly. `All` is the
/// three-panel view, where the axis has to come from the face that was
/// picked; oblique and unknown axes cannot be edited at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeAxis {
    X,
    Y,
    Z,
    All,
    Oblique,
    ObliqueX,
    ObliqueY,
    ObliqueZ,
    ObliqueAll,
    Unknown,
}

impl VolumeAxis {
    /// Grid dimension (0, 1, 2) of an orthogonal axis.
    pub fn index(&self) -> Option<usize> {
        match self {
            VolumeAxis::X => Some(0),
            VolumeAxis::Y => Some(1),
            VolumeAxis::Z => Some(2),
            _ => None,
        }
    }

    pub fn is_orthogonal(&self) -> bool {
        self.index().is_some()
    }

    pub fn is_oblique(&self) -> bool {
        matches!(
            self,
            VolumeAxis::Oblique
                | VolumeAxis::ObliqueX
                | VolumeAxis::ObliqueY
                | VolumeAxis::ObliqueZ
                | VolumeAxis::ObliqueAll
        )
    }
}

impl Display for VolumeAxis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VolumeAxis::X => "X",
            VolumeAxis::Y => "Y",
            VolumeAxis::Z => "Z",
            VolumeAxis::All => "ALL",
            VolumeAxis::Oblique => "OBLIQUE",
            VolumeAxis::ObliqueX => "OBLIQUE_X",
            VolumeAxis::ObliqueY => "OBLIQUE_Y",
            VolumeAxis::ObliqueZ => "OBLIQUE_Z",
            VolumeAxis::ObliqueAll => "OBLIQUE_ALL",
            VolumeAxis::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}
