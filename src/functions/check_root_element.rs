use quick_xml::events::Event;
use quick_xml::Reader;

use crate::structures::Error;

/// Serde ignores the name of the document element, so check it by hand.
pub(crate) fn check_root_element(document: &str, expected: &str) -> Result<(), Error> {
  let mut reader = Reader::from_str(document);
  loop {
    match reader.read_event() {
      Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
        let name = element.name();
        return if name.local_name().as_ref() == expected.as_bytes() {
          Ok(())
        } else {
          Err(Error::ManifestMalformed(format!("expected <{}> as root element, found <{}>", expected, String::from_utf8_lossy(name.as_ref()))))
        };
      },
      Ok(Event::Eof) => return Err(Error::ManifestMalformed(format!("document has no <{}> element", expected))),
      Ok(_) => continue,
      Err(error) => return Err(Error::ManifestMalformed(error.to_string())),
    }
  }
}
