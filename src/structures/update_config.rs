use serde::Deserialize;

/// Descriptive metadata served next to the manifest. Has no influence on reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
  #[serde(rename = "UpdaterTitle")]
  pub updater_title: String,
  #[serde(rename = "SelfUpdatePath")]
  pub self_update_path: String,
  #[serde(rename = "UpdaterVersion")]
  pub updater_version: i64,
  #[serde(rename = "GameStartPathRu")]
  pub game_start_path_ru: String,
  #[serde(rename = "GameStartPathEng")]
  pub game_start_path_eng: String,
  #[serde(rename = "PatchPath")]
  pub patch_path: String,
  #[serde(rename = "SiteLink")]
  pub site_link: String,
  #[serde(rename = "RegLink")]
  pub reg_link: String,
  #[serde(rename = "AboutServerLink")]
  pub about_server_link: String,
  #[serde(rename = "ForumLink")]
  pub forum_link: String,
  #[serde(rename = "HelpLink")]
  pub help_link: String,
  #[serde(rename = "BonusLink")]
  pub bonus_link: String,
  #[serde(rename = "FBLink")]
  pub fb_link: String,
  #[serde(rename = "DiscordLink")]
  pub discord_link: String,
  #[serde(rename = "TelegramLink")]
  pub telegram_link: String,
  #[serde(rename = "VkLink")]
  pub vk_link: String,
  #[serde(rename = "SupportLink")]
  pub support_link: String,
  #[serde(rename = "DonationLink")]
  pub donation_link: String,
  #[serde(rename = "CabinetLink")]
  pub cabinet_link: String,
  #[serde(rename = "L2Top")]
  pub l2_top: String,
  #[serde(rename = "MMOTop")]
  pub mmo_top: String,
  #[serde(rename = "DownloadLink1")]
  pub download_link_1: String,
  #[serde(rename = "DownloadLink2")]
  pub download_link_2: String,
  #[serde(rename = "DownloadLink3")]
  pub download_link_3: String,
}
