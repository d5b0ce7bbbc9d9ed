use crate::functions::check_root_element;
use crate::structures::{Error, UpdateConfig};

pub(crate) const CONFIG_ROOT_ELEMENT : &str = "UpdateConfig";

impl UpdateConfig {
  pub fn parse(document: &str) -> Result<Self, Error> {
    check_root_element(document, CONFIG_ROOT_ELEMENT)?;
    Ok(quick_xml::de::from_str(document)?)
  }
}

#[cfg(test)]
mod tests {
  use crate::structures::{Error, UpdateConfig};

  #[test]
  fn parses_links_and_titles() {
    let document = r#"<?xml version="1.0"?>
<UpdateConfig>
  <UpdaterTitle>Interlude x50</UpdaterTitle>
  <UpdaterVersion>4</UpdaterVersion>
  <SiteLink>https://example.org</SiteLink>
  <FBLink>https://facebook.com/example</FBLink>
  <MMOTop>https://mmotop.example.org</MMOTop>
</UpdateConfig>"#;
    let config = UpdateConfig::parse(document).expect("config should parse");
    assert_eq!(config.updater_title, "Interlude x50");
    assert_eq!(config.updater_version, 4);
    assert_eq!(config.site_link, "https://example.org");
    assert_eq!(config.fb_link, "https://facebook.com/example");
    assert_eq!(config.mmo_top, "https://mmotop.example.org");
    assert_eq!(config.discord_link, "");
  }

  #[test]
  fn rejects_manifest_documents() {
    let document = "<UpdateInfo><Version>1</Version></UpdateInfo>";
    assert!(matches!(UpdateConfig::parse(document), Err(Error::ManifestMalformed(_))));
  }
}
