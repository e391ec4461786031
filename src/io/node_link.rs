use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::Path,
};

use fxhash::FxHashMap;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use super::{super::graph::*, invalid_graph};
use crate::utils::ContractionSequence;

#[derive(Deserialize)]
struct NodeLinkData<V> {
    #[serde(default)]
    directed: bool,
    #[serde(default)]
    multigraph: bool,
    nodes: Vec<NodeData<V>>,
    #[serde(default = "Vec::new", alias = "edges")]
    links: Vec<LinkData<V>>,
}

#[derive(Deserialize)]
struct NodeData<V> {
    id: V,
    #[serde(default)]
    pos: Option<Vec<f64>>,
}

#[derive(Deserialize)]
struct LinkData<V> {
    source: V,
    target: V,
}

fn invalid_data(info: String) -> std::io::Error {
    std::io::Error::new(ErrorKind::InvalidData, info)
}

impl<V> NodeLinkData<V> {
    fn check_supported(&self) -> Result<(), std::io::Error> {
        if self.directed {
            return Err(invalid_data("directed graphs are not supported".into()));
        }

        if self.multigraph {
            return Err(invalid_data("multigraphs are not supported".into()));
        }

        Ok(())
    }

    fn try_map_ids<W>(
        self,
        f: impl Fn(V) -> Result<W, std::io::Error>,
    ) -> Result<NodeLinkData<W>, std::io::Error> {
        let nodes: Vec<NodeData<W>> = self
            .nodes
            .into_iter()
            .map(|node| -> Result<_, std::io::Error> {
                Ok(NodeData {
                    id: f(node.id)?,
                    pos: node.pos,
                })
            })
            .collect::<Result<_, std::io::Error>>()?;

        let links: Vec<LinkData<W>> = self
            .links
            .into_iter()
            .map(|link| -> Result<_, std::io::Error> {
                Ok(LinkData {
                    source: f(link.source)?,
                    target: f(link.target)?,
                })
            })
            .collect::<Result<_, std::io::Error>>()?;

        Ok(NodeLinkData {
            directed: self.directed,
            multigraph: self.multigraph,
            nodes,
            links,
        })
    }
}

impl<V: Vertex> NodeLinkData<V> {
    fn try_into_graph(self) -> Result<Graph<V>, std::io::Error> {
        self.check_supported()?;

        let graph = Graph::try_new(
            self.nodes.iter().map(|node| node.id),
            self.links.iter().map(|link| Edge(link.source, link.target)),
        )
        .map_err(invalid_graph)?;

        let mut positions = self
            .nodes
            .iter()
            .filter_map(|node| Some((node.id, node.pos.as_ref()?)))
            .peekable();

        if positions.peek().is_none() {
            return Ok(graph);
        }

        let layout = Layout::try_from_coordinates(positions)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;

        graph.with_layout(layout).map_err(invalid_graph)
    }
}

/// Reads graphs stored in the node-link JSON layout (as produced by networkx).
/// Node ids are used as vertices unchanged; edges keep the orientation
/// `(source, target)` and the order of the file.
pub trait GraphNodeLinkReader: Sized {
    fn try_read_node_link<R: Read>(reader: R) -> Result<Self, std::io::Error>;
    fn try_read_node_link_file<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error>;
}

impl<V: Vertex + DeserializeOwned> GraphNodeLinkReader for Graph<V> {
    fn try_read_node_link<R: Read>(reader: R) -> Result<Self, std::io::Error> {
        let data: NodeLinkData<V> = serde_json::from_reader(reader)?;
        data.try_into_graph()
    }

    fn try_read_node_link_file<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let reader = BufReader::new(File::open(path)?);
        Self::try_read_node_link(reader)
    }
}

fn as_node(id: &Value) -> Option<Node> {
    id.as_u64().and_then(|x| Node::try_from(x).ok())
}

/// The original ids of a node-link graph whose nodes were relabeled to `0..n`,
/// in the order of the node list. Ids are compared by their JSON text, so
/// `1` and `"1"` are different nodes.
#[derive(Clone, Debug, Default)]
pub struct NodeIds {
    ids: Vec<Value>,
    vertices: FxHashMap<String, Node>,
}

impl NodeIds {
    fn try_new(ids: impl IntoIterator<Item = Value>) -> Result<Self, std::io::Error> {
        let mut result = Self::default();
        for id in ids {
            let u = Node::try_from(result.ids.len())
                .map_err(|_| invalid_data("too many nodes".into()))?;
            if result.vertices.insert(id.to_string(), u).is_some() {
                return Err(invalid_data(format!("duplicate node id {id}")));
            }
            result.ids.push(id);
        }
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Original ids indexed by vertex
    pub fn ids(&self) -> &[Value] {
        &self.ids
    }

    pub fn id_of(&self, u: Node) -> Option<&Value> {
        self.ids.get(u as usize)
    }

    pub fn vertex_of(&self, id: &Value) -> Option<Node> {
        self.vertices.get(&id.to_string()).copied()
    }

    fn try_vertex_of(&self, id: &Value) -> Result<Node, std::io::Error> {
        self.vertex_of(id)
            .ok_or_else(|| invalid_data(format!("unknown node id {id}")))
    }

    /// Reads a JSON array of `[survivor, removed]` pairs given by original ids
    pub fn try_read_contraction_sequence<R: Read>(
        &self,
        reader: R,
    ) -> Result<ContractionSequence, std::io::Error> {
        let pairs: Vec<(Value, Value)> = serde_json::from_reader(reader)?;
        pairs
            .iter()
            .map(|(survivor, removed)| -> Result<(Node, Node), std::io::Error> {
                Ok((self.try_vertex_of(survivor)?, self.try_vertex_of(removed)?))
            })
            .collect()
    }
}

/// Reads a node-link graph with arbitrary node ids. If every id is an integer
/// that fits into [`Node`], the ids are the vertices and no table is returned.
/// Otherwise the nodes are relabeled to `0..n` and their ids are returned.
pub fn try_read_node_link_relabeled<R: Read>(
    reader: R,
) -> Result<(Graph, Option<NodeIds>), std::io::Error> {
    let data: NodeLinkData<Value> = serde_json::from_reader(reader)?;
    data.check_supported()?;

    let numeric = data
        .nodes
        .iter()
        .map(|node| &node.id)
        .chain(data.links.iter().flat_map(|link| [&link.source, &link.target]))
        .all(|id| as_node(id).is_some());

    if numeric {
        let data = data.try_map_ids(|id| {
            as_node(&id).ok_or_else(|| invalid_data(format!("node id {id} is out of range")))
        })?;
        return Ok((data.try_into_graph()?, None));
    }

    let ids = NodeIds::try_new(data.nodes.iter().map(|node| node.id.clone()))?;
    let data = data.try_map_ids(|id| ids.try_vertex_of(&id))?;
    Ok((data.try_into_graph()?, Some(ids)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::InvalidGraph;
    use std::io::Write;

    const TRIANGLE_WITH_TAIL: &str = r#"{
        "directed": false,
        "multigraph": false,
        "graph": {},
        "nodes": [
            {"pos": [0.0, 1.0], "id": 1},
            {"pos": [1.0, 0.0], "id": 2},
            {"pos": [2.0, 2.0], "id": 3},
            {"pos": [3.0, 1.5], "id": 4}
        ],
        "links": [
            {"source": 1, "target": 2},
            {"source": 3, "target": 1},
            {"source": 2, "target": 3},
            {"source": 4, "target": 2}
        ]
    }"#;

    fn read(input: &str) -> Result<Graph, std::io::Error> {
        Graph::try_read_node_link(input.as_bytes())
    }

    #[test]
    fn reads_nodes_links_and_positions() {
        let graph = read(TRIANGLE_WITH_TAIL).unwrap();

        assert_eq!(graph.vertices(), &[1, 2, 3, 4]);
        assert_eq!(
            graph.edges(),
            &[Edge(1, 2), Edge(3, 1), Edge(2, 3), Edge(4, 2)]
        );

        let layout = graph.layout().unwrap();
        assert!(graph.has_complete_layout());
        assert_eq!(layout.dimension(), Dimension::Planar);
        assert_eq!(layout.position_of(4), Some(Position([3.0, 1.5, 0.0])));
    }

    #[test]
    fn accepts_edges_key_and_missing_positions() {
        let graph = read(r#"{"nodes": [{"id": 0}, {"id": 1}, {"id": 2}], "edges": [{"source": 0, "target": 2}]}"#)
            .unwrap();

        assert_eq!(graph.vertices(), &[0, 1, 2]);
        assert_eq!(graph.edges(), &[Edge(0, 2)]);
        assert!(graph.layout().is_none());
        assert!(!graph.has_complete_layout());
    }

    #[test]
    fn partial_spatial_layout() {
        let graph = read(
            r#"{"nodes": [{"id": 0, "pos": [1, 2, 3]}, {"id": 1}], "links": [{"source": 0, "target": 1}]}"#,
        )
        .unwrap();

        let layout = graph.layout().unwrap();
        assert_eq!(layout.dimension(), Dimension::Spatial);
        assert_eq!(layout.len(), 1);
        assert!(!graph.has_complete_layout());
    }

    #[test]
    fn rejects_unsupported_graphs() {
        for input in [
            r#"{"directed": true, "nodes": [{"id": 0}], "links": []}"#,
            r#"{"multigraph": true, "nodes": [{"id": 0}], "links": []}"#,
            r#"{"nodes": [{"id": 0, "pos": [1]}], "links": []}"#,
            r#"{"nodes": [{"id": 0, "pos": [1, 2]}, {"id": 1, "pos": [1, 2, 3]}], "links": []}"#,
            r#"{"links": []}"#,
            r#"{"nodes": [{"id": "a"}], "links": []}"#,
            "not json",
        ] {
            let err = read(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidData, "{input}");
        }
    }

    #[test]
    fn rejects_invalid_graphs() {
        let err = read(r#"{"nodes": [{"id": 0}, {"id": 1}], "links": [{"source": 0, "target": 1}, {"source": 1, "target": 0}]}"#)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(
            err.get_ref()
                .and_then(|e| e.downcast_ref::<InvalidGraph<Node>>()),
            Some(&InvalidGraph::DuplicateEdge(1, 0))
        );

        assert!(read(r#"{"nodes": [{"id": 0}], "links": [{"source": 0, "target": 5}]}"#).is_err());
    }

    #[test]
    fn links_may_be_omitted() {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
        struct Label(u8);

        let graph: Graph<Label> =
            Graph::try_read_node_link(r#"{"nodes": [{"id": 3}, {"id": 1}]}"#.as_bytes()).unwrap();
        assert_eq!(graph.vertices(), &[Label(3), Label(1)]);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn relabels_string_ids() {
        let (graph, ids) = try_read_node_link_relabeled(
            r#"{"nodes": [{"id": "b"}, {"id": "a"}, {"id": 7}], "links": [{"source": "a", "target": 7}, {"source": "b", "target": "a"}]}"#
                .as_bytes(),
        )
        .unwrap();
        let ids = ids.unwrap();

        assert_eq!(graph.vertices(), &[0, 1, 2]);
        assert_eq!(graph.edges(), &[Edge(1, 2), Edge(0, 1)]);
        assert_eq!(ids.len(), 3);
        assert_eq!(ids.id_of(1), Some(&Value::from("a")));
        assert_eq!(ids.vertex_of(&Value::from(7)), Some(2));
        assert_eq!(ids.vertex_of(&Value::from("7")), None);

        let seq = ids
            .try_read_contraction_sequence(r#"[["a", 7], ["b", "a"]]"#.as_bytes())
            .unwrap();
        assert_eq!(seq.contractions(), &[(1, 2), (0, 1)]);

        let err = ids
            .try_read_contraction_sequence(r#"[["a", "c"]]"#.as_bytes())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn numeric_ids_are_kept() {
        let (graph, ids) = try_read_node_link_relabeled(TRIANGLE_WITH_TAIL.as_bytes()).unwrap();
        assert!(ids.is_none());
        assert_eq!(graph.vertices(), &[1, 2, 3, 4]);
        assert!(graph.has_complete_layout());
    }

    #[test]
    fn relabeling_rejects_broken_files() {
        for input in [
            r#"{"nodes": [{"id": "a"}, {"id": "a"}], "links": []}"#,
            r#"{"nodes": [{"id": "a"}], "links": [{"source": "a", "target": "b"}]}"#,
            r#"{"directed": true, "nodes": [{"id": "a"}], "links": []}"#,
            r#"{"nodes": [{"id": "a"}, {"id": "b"}], "links": [{"source": "a", "target": "a"}]}"#,
        ] {
            let err = try_read_node_link_relabeled(input.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidData, "{input}");
        }
    }

    #[test]
    fn read_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(TRIANGLE_WITH_TAIL.as_bytes()).unwrap();

        let graph: Graph = Graph::try_read_node_link_file(file.path()).unwrap();
        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.number_of_edges(), 4);
    }
}
