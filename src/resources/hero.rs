//! Hero text client.

use super::{HeroTextApi, Resource};
use crate::Result;
use crate::cache::Params;
use crate::types::{HeroText, HeroTextPatch, NewHeroText};

impl Resource for HeroText {
    const NAMESPACE: &'static str = "hero";
    const PATH: &'static str = "/hero";
    type Draft = NewHeroText;
    type Patch = HeroTextPatch;
}

impl HeroTextApi {
    /// The hero block currently shown on the landing page.
    pub async fn get_active(&self) -> Result<HeroText> {
        self.fetch(
            "getActive",
            Params::new(),
            format!("{}/active", HeroText::PATH),
            Params::new(),
        )
        .await
    }
}
