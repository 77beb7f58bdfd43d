//! Display delegate for lumber objects.

use feature_host::{ObjectData, ViewBehavior, ViewData};
use serde_json::Value;
use tracing::info;

/// Tree-view icon, 16x16 XPM.
pub const LUMBER_ICON_XPM: &str = concat!(
    "/* XPM */\n",
    "static const char * ViewProviderLumber_xpm[] = {\n",
    "\"16 16 6 1\",\n",
    "\" \tc None\",\n",
    "\".\tc #141010\",\n",
    "\"+\tc #615BD2\",\n",
    "\"@\tc #C39D55\",\n",
    "\"#\tc #000000\",\n",
    "\"$\tc #57C355\",\n",
    "\"        ........\",\n",
    "\"   ......++..+..\",\n",
    "\"   .@@@@.++..++.\",\n",
    "\"   .@@@@.++..++.\",\n",
    "\"   .@@  .++++++.\",\n",
    "\"  ..@@  .++..++.\",\n",
    "\"###@@@@ .++..++.\",\n",
    "\"##$.@@$#.++++++.\",\n",
    "\"#$#$.$$$........\",\n",
    "\"#$$#######      \",\n",
    "\"#$$#$$$$$#      \",\n",
    "\"#$$#$$$$$#      \",\n",
    "\"#$$#$$$$$#      \",\n",
    "\" #$#$$$$$#      \",\n",
    "\"  ##$$$$$#      \",\n",
    "\"   #######      \"};\n",
);

/// View delegate for lumber. Adds nothing to the scene and keeps no state,
/// so it is rebuilt fresh whenever a document is reloaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewProviderLumber;

impl ViewBehavior for ViewProviderLumber {
    fn attach(&mut self, _vobj: &mut ViewData) {}

    fn update_data(&mut self, _obj: &ObjectData, _property: &str) {}

    fn display_modes(&self, _vobj: &ViewData) -> Vec<String> {
        Vec::new()
    }

    fn default_display_mode(&self) -> String {
        "Shaded".to_string()
    }

    fn set_display_mode(&self, mode: &str) -> String {
        mode.to_string()
    }

    fn on_changed(&mut self, _vobj: &mut ViewData, property: &str) {
        info!(property, "Change property");
    }

    fn icon(&self) -> &str {
        LUMBER_ICON_XPM
    }

    fn get_state(&self) -> Option<Value> {
        None
    }

    fn set_state(&mut self, _state: Option<Value>) {}
}
