use marshal_core::{
    mapping::{Transformations, create_object_from_map},
    prelude::*,
    protocol::record::{from_bytes, to_bytes},
    registry::registered_name,
    serialize::JsonCodec,
};
use serde_json::json;

///
/// Ticket
///

#[derive(Clone, Debug, Default, Hydrate, PartialEq)]
#[marshal(serializable, storable)]
struct Ticket {
    #[marshal(flatten)]
    identity: IdentityInfo,
    #[marshal(flatten)]
    tracking: TrackingInfo,

    title: String,
    #[marshal(rename = "Prio")]
    priority: u32,
    r#type: String,
    labels: Vec<String>,
}

impl Serializable for Ticket {
    fn read_all(
        &mut self,
        codec: &dyn Codec,
        source: &mut dyn FieldSource,
    ) -> Result<(), MarshalError> {
        self.identity.read_all(codec, source)?;
        self.tracking.read_all(codec, source)?;

        source.read_string(codec, "Title", &mut self.title)?;
        source.read_string(codec, "Type", &mut self.r#type)?;
        source.read_array(codec, "Labels", &mut self.labels)
    }

    fn write_all(&self, codec: &dyn Codec, sink: &mut dyn FieldSink) -> Result<(), MarshalError> {
        self.identity.write_all(codec, sink)?;
        self.tracking.write_all(codec, sink)?;

        sink.write_string(codec, "Title", &self.title)?;
        sink.write_string(codec, "Type", &self.r#type)?;
        sink.write_array(codec, "Labels", &self.labels)
    }
}

impl Storable for Ticket {
    fn config(&self) -> StorableConfig {
        StorableConfig::new(Self::TYPE_NAME)
            .with_label_field("Title")
            .trackable()
    }

    fn id(&self) -> &str {
        self.identity.id()
    }

    fn set_id(&mut self, id: String) {
        self.identity.set_id(id);
    }

    fn as_trackable(&self) -> Option<&dyn Trackable> {
        Some(&self.tracking)
    }
}

impl Track for Ticket {
    fn as_trackable_mut(&mut self) -> Option<&mut dyn Trackable> {
        Some(&mut self.tracking)
    }
}

fn registry() -> TypeRegistry {
    let mut builder = TypeRegistry::builder();
    builder.register::<Ticket>().unwrap();

    builder.build()
}

#[test]
fn default_type_name_is_module_qualified() {
    assert_eq!(registered_name::<Ticket>(), "derive::Ticket");
}

#[test]
fn field_names_follow_upper_camel_case() {
    let names = Ticket::default().field_names();

    assert_eq!(
        names,
        vec![
            "Title",
            "Prio",
            "Type",
            "Labels",
            "Id",
            "CreatedBy",
            "UpdatedBy",
            "CreatedAt",
            "UpdatedAt",
        ]
    );
}

#[test]
fn hydrate_track_and_round_trip() {
    let registry = registry();
    let values = ValueMap::try_from(json!({
        "title": "Broken build",
        "Prio": "2",
        "Type": "bug",
        "Labels": ["ci", "urgent"],
        "CreatedBy": "ignored-by-set-values",
    }))
    .unwrap();

    let hydrator = Hydrator::new(&registry)
        .with_transformations(Transformations::new().rename("title", "Title"));
    let mut ticket = Ticket::default();

    // "2" is text, so the u32 field rejects it and nothing is applied
    assert!(hydrator.set_values(&mut ticket, &values).is_err());
    assert_eq!(ticket.title, "");

    let mut values = values;
    values.insert("Prio", 2);
    hydrator.set_values(&mut ticket, &values).unwrap();

    assert_eq!(ticket.title, "Broken build");
    assert_eq!(ticket.priority, 2);
    assert_eq!(ticket.r#type, "bug");
    assert!(ticket.tracking.is_new());

    marshal_core::entity::track(&mut ticket, Some("dev"));
    assert_eq!(ticket.tracking.created_by(), "dev");
    assert_eq!(ticket.label().as_deref(), Some("Broken build"));

    let codec = JsonCodec::default();
    let bytes = to_bytes(&codec, &ticket).unwrap();
    let mut decoded = Ticket::default();
    from_bytes(&codec, &bytes, &mut decoded).unwrap();

    // Prio is not part of the traversal
    assert_eq!(decoded.priority, 0);
    assert_eq!(decoded.identity, ticket.identity);
    assert_eq!(decoded.tracking, ticket.tracking);
    assert_eq!(decoded.labels, ticket.labels);
}

#[test]
fn registry_objects_report_their_capabilities() {
    let registry = registry();
    let mut object = registry.create_object(Ticket::TYPE_NAME).unwrap();

    assert_eq!(object.type_name(), "derive::Ticket");
    assert!(object.as_serializable_mut().is_some());
    assert_eq!(
        object.as_storable().map(|s| s.config().label_field),
        Some(Some("Title"))
    );

    let data = ValueMap::try_from(json!({ "Title": "From map", "Labels": ["x"] })).unwrap();
    let built = create_object_from_map(&registry, Ticket::TYPE_NAME, &data, None).unwrap();
    let ticket = built.downcast_ref::<Ticket>().unwrap();

    assert_eq!(ticket.title, "From map");
    assert_eq!(ticket.labels, vec!["x".to_string()]);
}
