//! Materials and their shader node graphs

use crate::image::ImageId;
use serde::{Deserialize, Serialize};

/// Input socket name for opacity on the principled shader
pub const ALPHA_INPUT: &str = "Alpha";
/// Input socket name for roughness on the principled shader
pub const ROUGHNESS_INPUT: &str = "Roughness";

/// How a material is blended when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMethod {
    #[default]
    Opaque,
    Clip,
    Hashed,
    Blend,
}

/// How a material casts shadows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMethod {
    None,
    #[default]
    Opaque,
    Clip,
    Hashed,
}

/// Default value held by an unconnected input socket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocketValue {
    Float(f32),
    Color([f32; 4]),
    Vector([f32; 3]),
    Shader,
}

impl SocketValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            SocketValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// A named node input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSocket {
    pub name: String,
    pub default_value: SocketValue,
}

impl NodeSocket {
    pub fn new(name: impl Into<String>, default_value: SocketValue) -> Self {
        Self {
            name: name.into(),
            default_value,
        }
    }
}

/// What a node does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum NodeKind {
    PrincipledBsdf,
    ImageTexture { image: Option<ImageId> },
    Other { type_name: String },
}

/// A shader node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub inputs: Vec<NodeSocket>,
}

impl Node {
    /// A principled shader with its usual scalar inputs at their stock defaults
    pub fn principled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::PrincipledBsdf,
            inputs: vec![
                NodeSocket::new("Base Color", SocketValue::Color([0.8, 0.8, 0.8, 1.0])),
                NodeSocket::new("Metallic", SocketValue::Float(0.0)),
                NodeSocket::new(ROUGHNESS_INPUT, SocketValue::Float(0.5)),
                NodeSocket::new("IOR", SocketValue::Float(1.45)),
                NodeSocket::new(ALPHA_INPUT, SocketValue::Float(1.0)),
                NodeSocket::new("Normal", SocketValue::Vector([0.0, 0.0, 0.0])),
            ],
        }
    }

    /// An image texture node sampling `image`
    pub fn image_texture(name: impl Into<String>, image: Option<ImageId>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::ImageTexture { image },
            inputs: vec![NodeSocket::new("Vector", SocketValue::Vector([0.0, 0.0, 0.0]))],
        }
    }

    /// Any other node kind
    pub fn other(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Other {
                type_name: type_name.into(),
            },
            inputs: Vec::new(),
        }
    }

    pub fn input(&self, name: &str) -> Option<&NodeSocket> {
        self.inputs.iter().find(|s| s.name == name)
    }

    pub fn input_mut(&mut self, name: &str) -> Option<&mut NodeSocket> {
        self.inputs.iter_mut().find(|s| s.name == name)
    }

    pub fn is_principled(&self) -> bool {
        matches!(self.kind, NodeKind::PrincipledBsdf)
    }

    /// Image referenced by an image texture node
    pub fn image(&self) -> Option<ImageId> {
        match self.kind {
            NodeKind::ImageTexture { image } => image,
            _ => None,
        }
    }
}

/// A connection from one node output to another node input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLink {
    pub from_node: usize,
    pub from_socket: String,
    pub to_node: usize,
    pub to_socket: String,
}

/// Nodes plus the links between them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeTree {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<NodeLink>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its index
    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Connect `from.from_socket` into `to.to_socket`
    pub fn link(
        &mut self,
        from_node: usize,
        from_socket: impl Into<String>,
        to_node: usize,
        to_socket: impl Into<String>,
    ) {
        self.links.push(NodeLink {
            from_node,
            from_socket: from_socket.into(),
            to_node,
            to_socket: to_socket.into(),
        });
    }

    /// Links that feed the given input
    pub fn links_into<'a>(
        &'a self,
        node: usize,
        socket: &'a str,
    ) -> impl Iterator<Item = &'a NodeLink> + 'a {
        self.links
            .iter()
            .filter(move |l| l.to_node == node && l.to_socket == socket)
    }

    /// Remove every link feeding the given input, returning how many were removed
    pub fn unlink_input(&mut self, node: usize, socket: &str) -> usize {
        let before = self.links.len();
        self.links
            .retain(|l| !(l.to_node == node && l.to_socket == socket));
        before - self.links.len()
    }
}

/// A material datablock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    #[serde(default)]
    pub use_nodes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_tree: Option<NodeTree>,
    #[serde(default)]
    pub blend_method: BlendMethod,
    #[serde(default)]
    pub shadow_method: ShadowMethod,
}

impl Material {
    /// A material without a node graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            use_nodes: false,
            node_tree: None,
            blend_method: BlendMethod::Opaque,
            shadow_method: ShadowMethod::Opaque,
        }
    }

    /// A node-based material owning `tree`
    pub fn with_nodes(name: impl Into<String>, tree: NodeTree) -> Self {
        Self {
            use_nodes: true,
            node_tree: Some(tree),
            ..Self::new(name)
        }
    }

    /// The node tree, if the material actually renders through it
    pub fn active_tree(&self) -> Option<&NodeTree> {
        if self.use_nodes {
            self.node_tree.as_ref()
        } else {
            None
        }
    }
}
