//! End-to-end projection scenarios

mod common;

use pretty_assertions::assert_eq;
use sep2::defaults::Defaults;
use sep2::error::Error;
use sep2::links::{EndDeviceListLink, SelfDeviceLink, TimeLink};
use sep2::oracle::{check_conformance, SchemaOracle, StructuralOracle};
use sep2::resources::{DeviceCapability, EndDevice, EndDeviceList};
use sep2::{from_xml, to_xml, to_xml_with, ProjectionConfig};

// ============================================================================
// Device capability
// ============================================================================

fn scenario_dcap() -> DeviceCapability {
    DeviceCapability::new("/dcap", &Defaults::default())
        .with_time_link(TimeLink::new("/tm"))
        .with_self_device_link(SelfDeviceLink::new("/sdev"))
        .with_end_device_list_link(EndDeviceListLink::new("/edev", 1))
}

#[test]
fn test_device_capability_projection() {
    let xml = to_xml_with(&scenario_dcap(), &ProjectionConfig::compact()).unwrap();
    assert_eq!(
        xml,
        concat!(
            r#"<DeviceCapability xmlns="urn:ieee:std:2030.5:ns" href="/dcap" pollRate="900">"#,
            r#"<TimeLink href="/tm"/>"#,
            r#"<EndDeviceListLink href="/edev" all="1"/>"#,
            r#"<SelfDeviceLink href="/sdev"/>"#,
            r#"</DeviceCapability>"#
        )
    );
}

#[test]
fn test_device_capability_without_href() {
    let dcap = DeviceCapability::new("", &Defaults::default());
    let xml = to_xml_with(&dcap, &ProjectionConfig::compact()).unwrap();
    assert_eq!(xml, r#"<DeviceCapability xmlns="urn:ieee:std:2030.5:ns" pollRate="900"/>"#);
    assert_eq!(from_xml::<DeviceCapability>(&xml).unwrap(), dcap);
}

#[test]
fn test_device_capability_conforms() {
    let oracle = StructuralOracle;
    let schema = oracle.compile("sep.xsd").unwrap();
    check_conformance(&oracle, &schema, &scenario_dcap()).unwrap();
}

#[test]
fn test_device_capability_default_output_has_declaration() {
    let xml = to_xml(&scenario_dcap()).unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    let back: DeviceCapability = from_xml(&xml).unwrap();
    assert_eq!(back, scenario_dcap());
}

// ============================================================================
// End device list
// ============================================================================

fn scenario_list() -> EndDeviceList {
    let devices = (1000..1004).map(common::end_device_min).collect();
    EndDeviceList::new("/edev", 4, devices, &Defaults::default())
}

#[test]
fn test_end_device_list_projection() {
    let list = scenario_list();
    let root = sep2::projection::to_element(&list);

    assert_eq!(root.get_attribute("all"), Some("4"));
    assert_eq!(root.get_attribute("results"), Some("4"));
    let sfdis: Vec<_> = root
        .find_children("EndDevice")
        .iter()
        .map(|d| d.find_child("sFDI").and_then(|s| s.text.clone()).unwrap_or_default())
        .collect();
    assert_eq!(sfdis, vec!["1000", "1001", "1002", "1003"]);

    let back: EndDeviceList = from_xml(&to_xml(&list).unwrap()).unwrap();
    assert_eq!(back, list);
}

#[test]
fn test_end_device_list_conforms() {
    let oracle = StructuralOracle;
    let schema = oracle.compile("sep.xsd").unwrap();
    check_conformance(&oracle, &schema, &scenario_list()).unwrap();
}

#[test]
fn test_page_smaller_than_list() {
    let list = EndDeviceList::new("/edev", 40, vec![common::end_device_min(1)], &Defaults::default());
    let back: EndDeviceList = from_xml(&to_xml(&list).unwrap()).unwrap();
    assert_eq!(back.base.all, 40);
    assert_eq!(back.base.results, 1);
    assert_eq!(back.end_devices.len(), 1);
}

// ============================================================================
// Missing required field
// ============================================================================

#[test]
fn test_end_device_without_sfdi() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<EndDevice xmlns="urn:ieee:std:2030.5:ns" href="/edev/3" subscribable="0">
  <lFDI>3E4F45AB31EDFE5B67E343E5E4562E31984E23E5</lFDI>
  <changedTime>1700000000</changedTime>
</EndDevice>"#;

    match from_xml::<EndDevice>(xml) {
        Err(Error::MissingRequiredField { field, path }) => {
            assert_eq!(field, "sFDI");
            assert_eq!(path, "EndDevice");
        }
        other => panic!("expected MissingRequiredField, got {:?}", other),
    }
}

#[test]
fn test_missing_sfdi_inside_list_names_the_item() {
    let xml = r#"<EndDeviceList xmlns="urn:ieee:std:2030.5:ns" all="3" results="3">
  <EndDevice><sFDI>1</sFDI><changedTime>0</changedTime></EndDevice>
  <EndDevice><sFDI>2</sFDI><changedTime>0</changedTime></EndDevice>
  <EndDevice><changedTime>0</changedTime></EndDevice>
</EndDeviceList>"#;

    let err = from_xml::<EndDeviceList>(xml).unwrap_err();
    assert_eq!(err.path(), Some("EndDeviceList/EndDevice[2]"));
    assert!(err.to_string().contains("sFDI"));
}

#[test]
fn test_extension_element_with_same_name_is_ignored() {
    let xml = r#"<EndDevice xmlns="urn:ieee:std:2030.5:ns" xmlns:ext="urn:example:ext" href="/edev/3">
  <ext:sFDI>999</ext:sFDI>
  <sFDI>3</sFDI>
  <changedTime>1700000000</changedTime>
</EndDevice>"#;

    let device: EndDevice = from_xml(xml).unwrap();
    assert_eq!(device.base.sfdi.get(), 3);
}
