mod app;
mod config;
mod core;
mod models;
mod utils;

#[dotenvy::load(path = "./.env", required = false)]
#[tokio::main]
async fn main() {
    let config = config::Config::init().expect("Failed to initialize configuration");
    app::common::init_logging(&config);

    let store = match app::common::open_review_store(&config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open review storage: {e}");
            return;
        }
    };
    let posters = core::posters::PosterSupplier::from_config(&config);
    let widget = app::Widget::new(store, posters, config.scroller.use_random_posters);

    if let Some(submit) = &config.widget.submit {
        submit_review(&widget, submit);
    }

    render_cards(&widget, &config.widget.search);
    render_scroller(&widget).await;
}

fn submit_review(widget: &app::Widget, submit: &config::SubmitConfig) {
    let form = app::ReviewForm {
        movie_id: submit.movie_id.clone(),
        rating: submit.rating.clone(),
        text: submit.text.clone(),
    };
    match widget.submit(&form) {
        Ok(app::SubmitOutcome::Submitted { movie_id }) => {
            println!("Review added for {movie_id}, thank you!\n");
        }
        Ok(app::SubmitOutcome::Aborted) => {}
        Err(e) => tracing::error!("Review not saved: {e}"),
    }
}

fn render_cards(widget: &app::Widget, search: &str) {
    let cards = widget.cards(search);
    if cards.is_empty() {
        println!("No movies match '{}'", search.trim());
        return;
    }
    for card in cards {
        println!("{} ({})", card.movie.title, card.movie.year);
        println!("  {}", card.movie.description);
        println!(
            "  {} {} - {} review(s)",
            card.stars,
            card.score_label(),
            card.review_count
        );
        if let Some(details) = widget.details(&card.movie.id) {
            for review in &details.reviews {
                println!("    • ({}) {}", review.rating, review.text);
            }
        }
        println!();
    }
}

async fn render_scroller(widget: &app::Widget) {
    let scroller = widget.scroller().await;
    println!(
        "Now showing ({} posters, {}s loop):",
        scroller.items.len(),
        scroller.duration_secs
    );
    for item in &scroller.items {
        println!("  {} - Released: {} - {}", item.title, item.year, item.poster);
    }
    let marquee: Vec<&str> = scroller.track().map(|item| item.title.as_str()).collect();
    println!("  [{}]", marquee.join(" | "));
}
