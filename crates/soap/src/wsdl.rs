use quick_xml::escape::escape;

const TEMPLATE: &str = include_str!("enrollment_service.wsdl");
const LOCATION_PLACEHOLDER: &str = "{{location}}";

/// The service WSDL with `soap:address` pointing at `location`.
pub fn wsdl_document(location: &str) -> String {
    TEMPLATE.replace(LOCATION_PLACEHOLDER, &escape(location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wsdl_names_service_port_and_operations() {
        let doc = wsdl_document("http://127.0.0.1:5050/wsdl");
        assert!(doc.contains(r#"<service name="EnrollmentService">"#));
        assert!(doc.contains(r#"<port name="EnrollmentPort""#));
        assert!(doc.contains(r#"<operation name="enrollUser">"#));
        assert!(doc.contains(r#"<operation name="getEnrollments">"#));
        assert!(doc.contains(r#"<soap:address location="http://127.0.0.1:5050/wsdl"/>"#));
        assert!(!doc.contains(LOCATION_PLACEHOLDER));
    }

    #[test]
    fn location_is_escaped() {
        let doc = wsdl_document("http://h/wsdl?a=1&b=\"2\"");
        assert!(doc.contains("location=\"http://h/wsdl?a=1&amp;b=&quot;2&quot;\""));
    }
}
