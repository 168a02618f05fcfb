use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    csrf,
    forms::{FieldErrors, REVIEW_MAX_CHARS},
    models::{Movie, SENTINEL_REVIEW, SearchResult},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page(movies: &[Movie]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Search for one to add it to the list." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(
    movie: &Movie,
    rating: &str,
    review: &str,
    errors: &FieldErrors,
    csrf_token: &str,
) -> String {
    page(
        "Edit Movie",
        html! {
            (form_shell(html! {
                h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                p class="mt-2 text-gray-600" { "Edit Movie Rating" }

                form class="mt-8 space-y-6" method="post" action=(format!("/edit?id={}", movie.id)) {
                    input type="hidden" name=(csrf::FIELD_NAME) value=(csrf_token);
                    div {
                        label class="block text-sm font-medium text-gray-700" for="rating" { "Your Rating Out of 10 e.g. 7.5" }
                        input class=(INPUT_CLASS) name="rating" id="rating" value=(rating);
                        (field_error(errors, "rating"))
                    }
                    div {
                        label class="block text-sm font-medium text-gray-700" for="review" { "Your Review" }
                        input class=(INPUT_CLASS) name="review" id="review" maxlength=(REVIEW_MAX_CHARS) value=(review);
                        (field_error(errors, "review"))
                    }
                    button class=(BUTTON_CLASS) type="submit" { "Done" }
                }
            }))
        },
    )
}

pub fn add_page(title: &str, errors: &FieldErrors, csrf_token: &str) -> String {
    page(
        "Add Movie",
        html! {
            (form_shell(html! {
                h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }

                form class="mt-8 space-y-6" method="post" action="/add" {
                    input type="hidden" name=(csrf::FIELD_NAME) value=(csrf_token);
                    div {
                        label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title" }
                        input class=(INPUT_CLASS) name="title" id="title" value=(title);
                        (field_error(errors, "title"))
                    }
                    button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
                }
            }))
        },
    )
}

pub fn select_page(query: &str, results: &[SearchResult]) -> String {
    page(
        "Select Movie",
        html! {
            (form_shell(html! {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                        p class="mt-2 text-gray-600" { "Results for \"" (query) "\"" }
                    }
                    a class="text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
                }

                @if results.is_empty() {
                    p class="mt-8 text-gray-600" { "No matches found. Try another title." }
                } @else {
                    ul class="mt-8 divide-y divide-gray-200" {
                        @for result in results {
                            li class="py-3" {
                                @if result.release_date.is_empty() {
                                    span class="text-gray-500" { (result.title) " (release date unknown)" }
                                } @else {
                                    a class="text-blue-600 hover:text-blue-800" href=(entry_href(result)) {
                                        (result.title) " - " (result.release_date)
                                    }
                                }
                                span class="ml-2 text-xs text-gray-400" { "#" (result.id) }
                            }
                        }
                    }
                }
            }))
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" {
                            "Error"
                            span class="ml-2 font-normal text-gray-500" { (status.as_u16()) }
                        }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn form_shell(inner: Markup) -> Markup {
    html! {
        div class="min-h-screen bg-gray-50" {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" { (inner) }
            }
        }
    }
}

fn field_error(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            p class="mt-2 text-sm text-red-600" { (message) }
        }
    }
}

fn movie_card(movie: &Movie) -> Markup {
    let review = movie.review.as_deref().filter(|r| *r != SENTINEL_REVIEW);

    html! {
        div class="bg-white shadow rounded-lg overflow-hidden md:flex" {
            img class="h-48 w-full object-cover md:w-64" src=(movie.image_url) alt=(movie.title);
            div class="p-6 flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        (movie.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                    }
                    @if let Some(ranking) = movie.ranking {
                        span class="rounded-full bg-gray-900 px-3 py-1 text-sm font-bold text-white" { (ranking) }
                    }
                }
                p class="mt-1 text-sm text-gray-700" {
                    @match movie.rating {
                        Some(rating) => { "Rating: " (format!("{rating:.1}")) " / 10" },
                        None => { "Not rated yet" },
                    }
                }
                @if let Some(review) = review {
                    p class="mt-2 italic text-gray-600" { "\"" (review) "\"" }
                }
                p class="mt-3 text-sm text-gray-600" { (movie.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                }
            }
        }
    }
}

/// Link that imports a search result; title and date are path segments.
pub fn entry_href(result: &SearchResult) -> String {
    format!(
        "/entry/{}/{}/{}",
        result.id,
        urlencoding::encode(&result.release_date),
        urlencoding::encode(&result.title)
    )
}
