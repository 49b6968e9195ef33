use crate::model::{NodeKind, ProviderKind};

/// sRGB RGBA, 0..1.
pub type Rgba = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub color: Rgba,
    /// Radius in world units; also the node's visual weight.
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkStyle {
    pub color: Rgba,
    pub width: f32,
}

impl LinkStyle {
    pub fn is_hidden(&self) -> bool {
        self.width <= 0.0 || self.color[3] <= 0.0
    }
}

pub const HIDDEN_LINK: LinkStyle = LinkStyle {
    color: [0.0, 0.0, 0.0, 0.0],
    width: 0.0,
};

pub const FAINT_LINK: LinkStyle = LinkStyle {
    color: [0.55, 0.65, 0.85, 0.22],
    width: 1.0,
};

pub fn node_style(kind: NodeKind, sub_kind: Option<ProviderKind>) -> NodeStyle {
    match (kind, sub_kind) {
        (NodeKind::CityAnchor, _) => NodeStyle {
            color: [1.0, 0.84, 0.35, 1.0],
            size: 4.0,
        },
        (NodeKind::Location, _) => NodeStyle {
            color: [0.27, 0.78, 0.62, 1.0],
            size: 1.6,
        },
        (NodeKind::Project, _) => NodeStyle {
            color: [0.36, 0.55, 1.0, 1.0],
            size: 1.3,
        },
        (NodeKind::Provider, Some(ProviderKind::Productora)) => NodeStyle {
            color: [0.93, 0.36, 0.52, 1.0],
            size: 1.15,
        },
        (NodeKind::Provider, Some(ProviderKind::Company)) => NodeStyle {
            color: [0.98, 0.58, 0.24, 1.0],
            size: 1.1,
        },
        (NodeKind::Provider, Some(ProviderKind::Student)) => NodeStyle {
            color: [0.72, 0.86, 0.32, 1.0],
            size: 0.8,
        },
        (NodeKind::Provider, _) => NodeStyle {
            color: [0.74, 0.52, 0.96, 1.0],
            size: 1.0,
        },
    }
}

/// Links into an anchor exist for clustering only and are never drawn.
pub fn link_style(touches_anchor: bool) -> LinkStyle {
    if touches_anchor {
        HIDDEN_LINK
    } else {
        FAINT_LINK
    }
}
