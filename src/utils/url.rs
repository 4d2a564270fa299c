// src/utils/url.rs

//! Listing URL construction.

use url::Url;

use crate::models::SiteConfig;

/// Build the URL of a listing page.
///
/// The sort order and the minimum year are always requested; the page
/// parameter is only added from page 2 on, page 1 being the plain search.
///
/// # Examples
/// ```
/// use listing_check::models::SiteConfig;
/// use listing_check::utils::url::listing_url;
///
/// let site = SiteConfig {
///     base_url: "https://cars.example.com/search/".to_string(),
///     ..SiteConfig::default()
/// };
/// assert_eq!(
///     listing_url(&site, 3).unwrap().as_str(),
///     "https://cars.example.com/search/?sort=PRICE_DESC&yearMin=2015&page=3"
/// );
/// ```
pub fn listing_url(site: &SiteConfig, page: u32) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(site.base_url.trim())?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair(&site.sort_param, &site.sort_value);
        query.append_pair(&site.year_param, &site.min_year.to_string());
        if page > 1 {
            query.append_pair(&site.page_param, &page.to_string());
        }
    }
    Ok(url)
}
