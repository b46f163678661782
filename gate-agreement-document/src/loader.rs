//! Reading GATE documents and annotation schemas from XML.
//!
//! Files are read completely before parsing; nothing holds the file open afterwards.

use std::fs;
use std::path::Path;

use roxmltree::Node;

use crate::annotation::{Annotation, Feature};
use crate::document::{AnnotationSet, Document};
use crate::error::{DocumentError, DocumentResult};
use crate::schema::{AttributeDecl, Schema};
use crate::span::{NodeId, Span, TextNode};

fn read_source(path: &Path) -> DocumentResult<String> {
    fs::read_to_string(path).map_err(|e| DocumentError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load a GATE XML document from disk.
pub fn load_document(path: &Path) -> DocumentResult<Document> {
    let content = read_source(path)?;
    let document = parse_document(&content)?;
    tracing::debug!(
        path = %path.display(),
        nodes = document.nodes().len(),
        sets = document.annotation_sets().len(),
        "loaded document"
    );
    Ok(document)
}

/// Parse a GATE XML document.
pub fn parse_document(xml: &str) -> DocumentResult<Document> {
    let tree = roxmltree::Document::parse(xml)?;

    let text_with_nodes = tree
        .descendants()
        .find(|n| n.has_tag_name("TextWithNodes"))
        .ok_or_else(|| DocumentError::parse("missing TextWithNodes element"))?;

    let leading = text_until_node(text_with_nodes.children());

    let nodes = text_with_nodes
        .children()
        .filter(|c| c.has_tag_name("Node"))
        .map(|node| {
            let id = node_id(node, "id")?;
            Ok(TextNode::new(id, text_until_node(node.next_siblings().skip(1))))
        })
        .collect::<DocumentResult<Vec<_>>>()?;

    let sets = tree
        .descendants()
        .filter(|n| n.has_tag_name("AnnotationSet"))
        .map(parse_annotation_set)
        .collect::<DocumentResult<Vec<_>>>()?;

    Document::new(leading, nodes, sets)
}

/// Text nodes up to the next `Node` element. Comments and processing instructions are skipped.
fn text_until_node<'a, 'input: 'a>(siblings: impl Iterator<Item = Node<'a, 'input>>) -> String {
    siblings
        .take_while(|c| !c.has_tag_name("Node"))
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

fn parse_annotation_set(set: Node<'_, '_>) -> DocumentResult<AnnotationSet> {
    let name = set.attribute("Name").unwrap_or("");
    let annotations = set
        .children()
        .filter(|c| c.has_tag_name("Annotation"))
        .map(|annotation| parse_annotation(annotation, name))
        .collect::<DocumentResult<Vec<_>>>()?;
    Ok(AnnotationSet::new(name, annotations))
}

fn parse_annotation(annotation: Node<'_, '_>, set: &str) -> DocumentResult<Annotation> {
    let id = required_attr(annotation, "Id")?;
    let kind = required_attr(annotation, "Type")?;
    let start = node_id(annotation, "StartNode")?;
    let end = node_id(annotation, "EndNode")?;
    let span = Span::new(start, end).ok_or_else(|| {
        DocumentError::parse(format!(
            "annotation {} ends at node {} before it starts at node {}",
            id, end, start
        ))
    })?;

    let features = annotation
        .children()
        .filter(|c| c.has_tag_name("Feature"))
        .map(|feature| {
            let name = child_text(feature, "Name").ok_or_else(|| {
                DocumentError::parse(format!("feature without a Name on annotation {}", id))
            })?;
            Ok(match child_text(feature, "Value") {
                Some(value) => Feature::new(name, value),
                None => Feature::without_value(name),
            })
        })
        .collect::<DocumentResult<Vec<_>>>()?;

    Ok(Annotation::new(id, kind, set, span, features))
}

/// Load a GATE annotation schema from disk.
pub fn load_schema(path: &Path) -> DocumentResult<Schema> {
    let content = read_source(path)?;
    let schema = parse_schema(&content)?;
    tracing::debug!(
        path = %path.display(),
        types = schema.annotation_types().count(),
        "loaded schema"
    );
    Ok(schema)
}

/// Parse a GATE annotation schema.
///
/// Each `element` declares an annotation type; every `attribute` beneath it is comparable.
/// Tags are matched by local name, so any XML Schema namespace is accepted.
pub fn parse_schema(xml: &str) -> DocumentResult<Schema> {
    let tree = roxmltree::Document::parse(xml)?;
    let mut schema = Schema::new();

    for element in tree.descendants().filter(|n| n.has_tag_name("element")) {
        let Some(annotation_type) = element.attribute("name") else {
            continue;
        };
        let attributes = element
            .descendants()
            .filter(|n| n.has_tag_name("attribute"))
            .filter_map(|attribute| {
                let name = attribute.attribute("name")?;
                let values = attribute
                    .descendants()
                    .filter(|n| n.has_tag_name("enumeration"))
                    .filter_map(|n| n.attribute("value"));
                Some(AttributeDecl::new(name).with_values(values))
            })
            .collect();
        schema.declare(annotation_type, attributes);
    }

    Ok(schema)
}

fn required_attr<'a>(node: Node<'a, '_>, name: &str) -> DocumentResult<&'a str> {
    node.attribute(name).ok_or_else(|| {
        DocumentError::parse(format!(
            "<{}> is missing the {} attribute",
            node.tag_name().name(),
            name
        ))
    })
}

fn node_id(node: Node<'_, '_>, name: &str) -> DocumentResult<NodeId> {
    let raw = required_attr(node, name)?;
    raw.trim().parse().map_err(|_| {
        DocumentError::parse(format!(
            "<{}> has a non-integer {}: {:?}",
            node.tag_name().name(),
            name,
            raw
        ))
    })
}

fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|c| c.has_tag_name(tag))
        .map(|c| c.text().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnnotationFilter;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOCUMENT: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<GateDocument version="3">
<GateDocumentFeatures>
<Feature><Name className="java.lang.String">gate.SourceURL</Name><Value className="java.lang.String">file:/tmp/a.txt</Value></Feature>
</GateDocumentFeatures>
<TextWithNodes><Node id="0"/>The <Node id="4"/>minister <Node id="13"/>said <Node id="18"/>taxes &amp; fees<Node id="32"/></TextWithNodes>
<AnnotationSet>
<Annotation Id="0" Type="Token" StartNode="0" EndNode="3">
</Annotation>
</AnnotationSet>
<AnnotationSet Name="Ann1">
<Annotation Id="5" Type="Attribution" StartNode="4" EndNode="18">
<Feature><Name className="java.lang.String">Caused_Event</Name><Value className="java.lang.String">6 taxes &amp; fees</Value></Feature>
<Feature><Name className="java.lang.String">Certainty</Name><Value className="java.lang.String">3-high</Value></Feature>
</Annotation>
<Annotation Id="6" Type="Event" StartNode="18" EndNode="32">
<Feature><Name className="java.lang.String">Empty</Name><Value className="java.lang.String"></Value></Feature>
</Annotation>
</AnnotationSet>
</GateDocument>
"#;

    const SCHEMA: &str = r#"<?xml version="1.0"?>
<schema xmlns="http://www.w3.org/2000/10/XMLSchema">
  <element name="Attribution">
    <complexType>
      <attribute name="Caused_Event" use="optional" type="string"/>
      <attribute name="Certainty" use="optional">
        <simpleType>
          <restriction base="string">
            <enumeration value="1-low"/>
            <enumeration value="2-mid"/>
            <enumeration value="3-high"/>
          </restriction>
        </simpleType>
      </attribute>
    </complexType>
  </element>
  <element name="Event"/>
</schema>
"#;

    #[test]
    fn test_parse_text_with_nodes() {
        let doc = parse_document(DOCUMENT).unwrap();
        assert_eq!(doc.text(), "The minister said taxes & fees");
        assert_eq!(doc.nodes().len(), 5);
        assert_eq!(doc.text_span(Span::new(4, 18).unwrap()), "minister said ");
    }

    #[test]
    fn test_parse_sets_and_features() {
        let doc = parse_document(DOCUMENT).unwrap();
        assert_eq!(doc.annotation_set_names(), vec!["", "Ann1"]);

        let filter = AnnotationFilter::sets(["Ann1"], "Attribution");
        let attribution = doc.annotations(&filter).next().unwrap();
        assert_eq!(attribution.features().len(), 2);
        assert_eq!(attribution.feature("Certainty"), Some("3-high"));
        assert_eq!(attribution.caused_event_id(), Some("6"));
        assert_eq!(doc.text_of(doc.caused_event(attribution).unwrap()), "taxes & fees");

        let filter = AnnotationFilter::types(["Event"]);
        let event = doc.annotations(&filter).next().unwrap();
        assert_eq!(event.feature("Empty"), Some(""));
    }

    #[test]
    fn test_feature_without_value_element() {
        let xml = r#"<GateDocument><TextWithNodes><Node id="0"/>ab<Node id="2"/></TextWithNodes>
<AnnotationSet Name="A"><Annotation Id="1" Type="T" StartNode="0" EndNode="2">
<Feature><Name>P</Name></Feature>
<Feature><Name>Q</Name><Value/></Feature>
</Annotation></AnnotationSet>
</GateDocument>"#;
        let doc = parse_document(xml).unwrap();
        let annotation = &doc.annotation_sets()[0].annotations[0];
        assert_eq!(annotation.features()[0], Feature::without_value("P"));
        assert_eq!(annotation.feature("P"), None);
        assert_eq!(annotation.feature("Q"), Some(""));
    }

    #[test]
    fn test_comments_inside_text_with_nodes() {
        let xml = r#"<GateDocument><TextWithNodes><!--c0-->lead<Node id="0"/>ab<!--c1-->cd<?pi x?>e<Node id="4"/>f<Node id="5"/></TextWithNodes></GateDocument>"#;
        let doc = parse_document(xml).unwrap();
        assert_eq!(doc.text(), "leadabcdef");
        assert_eq!(doc.text_span(Span::new(0, 4).unwrap()), "abcde");
        assert_eq!(doc.text_span(Span::new(4, 5).unwrap()), "f");
    }

    #[test]
    fn test_document_features_are_not_annotation_features() {
        let doc = parse_document(DOCUMENT).unwrap();
        let filter = AnnotationFilter::types(["Token"]);
        let token = doc.annotations(&filter).next().unwrap();
        assert!(token.features().is_empty());
        assert_eq!(token.set, "");
    }

    #[test]
    fn test_missing_text_with_nodes() {
        let err = parse_document("<GateDocument></GateDocument>").unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            parse_document("<GateDocument>"),
            Err(DocumentError::Parse { .. })
        ));
    }

    #[test]
    fn test_non_integer_node() {
        let xml = r#"<GateDocument><TextWithNodes><Node id="x"/>a</TextWithNodes></GateDocument>"#;
        let err = parse_document(xml).unwrap_err();
        assert!(err.to_string().contains("non-integer id"));
    }

    #[test]
    fn test_reversed_annotation_span() {
        let xml = r#"<GateDocument><TextWithNodes><Node id="0"/>ab<Node id="2"/></TextWithNodes>
<AnnotationSet Name="A"><Annotation Id="1" Type="T" StartNode="2" EndNode="0"/></AnnotationSet>
</GateDocument>"#;
        assert!(parse_document(xml).is_err());
    }

    #[test]
    fn test_load_document_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();
        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.annotation_sets()[1].annotations.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_document(Path::new("/nonexistent/doc.xml")).unwrap_err();
        assert!(matches!(err, DocumentError::Load { .. }));
    }

    #[test]
    fn test_parse_prefixed_2001_schema() {
        let xml = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="Claim">
    <xs:complexType>
      <xs:attribute name="Polarity" use="optional">
        <xs:simpleType>
          <xs:restriction base="xs:string">
            <xs:enumeration value="neg"/>
            <xs:enumeration value="pos"/>
          </xs:restriction>
        </xs:simpleType>
      </xs:attribute>
      <xs:attribute name="Holder" use="optional" type="xs:string"/>
    </xs:complexType>
  </xs:element>
</xs:schema>
"#;
        let schema = parse_schema(xml).unwrap();
        assert_eq!(schema.attributes_for("Claim").unwrap(), vec!["Polarity", "Holder"]);
        assert_eq!(
            schema.allowed_values("Claim", "Polarity").unwrap(),
            &["neg".to_string(), "pos".to_string()]
        );
        assert!(schema.allowed_values("Claim", "Holder").unwrap().is_empty());
    }

    #[test]
    fn test_parse_schema() {
        let schema = parse_schema(SCHEMA).unwrap();
        assert_eq!(
            schema.attributes_for("Attribution").unwrap(),
            vec!["Caused_Event", "Certainty"]
        );
        assert_eq!(
            schema.allowed_values("Attribution", "Certainty").unwrap(),
            &["1-low".to_string(), "2-mid".to_string(), "3-high".to_string()]
        );
        assert!(schema.declares("Event"));
        assert!(schema.attributes_for("Event").unwrap().is_empty());
    }
}
