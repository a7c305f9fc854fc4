//! Marketing landing page at `/`.

use leptos::prelude::*;

use crate::components::features_section::FeaturesSection;
use crate::components::footer::Footer;
use crate::components::hero::Hero;
use crate::components::problem_section::ProblemSection;
use crate::components::target_users_section::TargetUsersSection;

#[cfg(test)]
#[path = "landing_test.rs"]
mod landing_test;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing-page">
            <div class="landing-page__inner">
                <Hero/>
                <ProblemSection/>
                <FeaturesSection/>
                <TargetUsersSection/>
            </div>
            <Footer/>
        </div>
    }
}
