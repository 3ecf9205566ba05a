// src/specs/community_day.rs
//! Community Day: featured species is the first word of the title, bonuses are
//! the `div.bonus-text` blocks (footnote asterisks removed).

use scraper::Html;

use crate::core::html::{doc_select_one, select_all, select_one, text_of};
use crate::event::{BONUSES_KEY, Content, ContentValue, FEATURED_KEY};

pub fn extract(doc: &Html) -> Content {
    let article = doc_select_one(doc, "article.event-page").unwrap_or_else(|| doc.root_element());

    let featured: Vec<String> = select_one(article, "h1.page-title")
        .map(text_of)
        .and_then(|t| t.split_whitespace().next().map(str::to_uppercase))
        .into_iter()
        .collect();

    let bonuses: Vec<String> = select_all(article, "div.bonus-text")
        .into_iter()
        .map(|b| b.text().collect::<String>().replace('*', "").trim().to_string())
        .filter(|b| !b.is_empty())
        .collect();

    let mut content = Content::new();
    content.insert(s!(FEATURED_KEY), ContentValue::List(featured));
    content.insert(s!(BONUSES_KEY), ContentValue::List(bonuses));
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_species_and_cleaned_bonuses() {
        let doc = Html::parse_document(r#"
            <article class="event-page">
              <h1 class="page-title">Bulbasaur Community Day</h1>
              <div class="bonus-text">*2x Candy*</div>
              <div class="bonus-text"> 3x Stardust </div>
            </article>
        "#);
        let c = extract(&doc);
        assert_eq!(c.get(FEATURED_KEY), Some(&ContentValue::List(vec![s!("BULBASAUR")])));
        assert_eq!(
            c.get(BONUSES_KEY),
            Some(&ContentValue::List(vec![s!("2x Candy"), s!("3x Stardust")]))
        );
    }

    #[test]
    fn works_without_article_wrapper() {
        let doc = Html::parse_document(r#"<h1 class="page-title">Eevee Community Day</h1>"#);
        let c = extract(&doc);
        assert_eq!(c.get(FEATURED_KEY), Some(&ContentValue::List(vec![s!("EEVEE")])));
        assert_eq!(c.get(BONUSES_KEY), Some(&ContentValue::List(vec![])));
    }
}
