use crate::domain::a001_sbom::ui::details::SbomDetails;
use crate::domain::a001_sbom::ui::list::SbomList;
use crate::domain::a001_sbom::ui::upload::SbomUpload;
use crate::domain::a002_package::ui::details::PackageDetails;
use crate::domain::a002_package::ui::list::PackageList;
use crate::domain::a003_advisory::ui::details::AdvisoryDetails;
use crate::domain::a003_advisory::ui::list::AdvisoryList;
use crate::domain::a003_advisory::ui::upload::AdvisoryUpload;
use crate::domain::a004_vulnerability::ui::details::VulnerabilityDetailsPage;
use crate::domain::a004_vulnerability::ui::list::VulnerabilityList;
use crate::domain::a005_importer::ui::edit::{ImporterCreate, ImporterEdit};
use crate::domain::a005_importer::ui::list::ImporterList;
use crate::domain::a006_license::ui::list::LicenseList;
use crate::layout::Shell;
use crate::shared::components::not_found::NotFound;
use crate::usecases::u501_search::SearchPage;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

/// Static segments (`upload`) come before the `:id` routes they would otherwise match
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=|| view! { <Redirect path="/search" /> } />
                    <Route path=path!("/search") view=SearchPage />
                    <Route path=path!("/sboms") view=SbomList />
                    <Route path=path!("/sboms/upload") view=SbomUpload />
                    <Route path=path!("/sboms/:sbom_id") view=SbomDetails />
                    <Route path=path!("/packages") view=PackageList />
                    <Route path=path!("/packages/:package_id") view=PackageDetails />
                    <Route path=path!("/advisories") view=AdvisoryList />
                    <Route path=path!("/advisories/upload") view=AdvisoryUpload />
                    <Route path=path!("/advisories/:advisory_id") view=AdvisoryDetails />
                    <Route path=path!("/vulnerabilities") view=VulnerabilityList />
                    <Route path=path!("/vulnerabilities/:vulnerability_id") view=VulnerabilityDetailsPage />
                    <Route path=path!("/licenses") view=LicenseList />
                    <Route path=path!("/importers") view=ImporterList />
                    <Route path=path!("/importers/create") view=ImporterCreate />
                    <Route path=path!("/importers/:importer_name/edit") view=ImporterEdit />
                </Routes>
            </Shell>
        </Router>
    }
}
