use opensocial_xml_input::{convert, Config, EntityKind};

fn main() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<mediaItem xmlns="http://ns.opensocial.org/2008/opensocial">
  <id>11223344</id>
  <type>image</type>
  <url>http://pages.example.org/images/11223344.png</url>
</mediaItem>"#;
    let conf = Config::new_with_defaults();
    let json = convert(EntityKind::MediaItems, xml, &conf);
    println!("{}", json.expect("Malformed XML"));

    let kind: EntityKind = "appdata".parse().expect("Unknown entity kind");
    let xml = "<response><entry><key>sign</key><value>Virgo</value></entry></response>";
    let json = convert(kind, xml, &conf);
    println!("{}", json.expect("Malformed XML"));
}
