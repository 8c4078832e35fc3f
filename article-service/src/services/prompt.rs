//! Prompt construction strategies.
//!
//! Pure functions mapping a [`GenerationRequest`] to the outbound message
//! exchange. The handler control flow never changes; only the rendered
//! template does.

use crate::config::PromptStyle;
use crate::models::GenerationRequest;
use crate::services::providers::ChatMessage;

/// Build the outbound messages for the configured prompt style.
pub fn build_messages(style: PromptStyle, request: &GenerationRequest) -> Vec<ChatMessage> {
    match style {
        PromptStyle::Classic => classic_messages(request),
        PromptStyle::TopicLed => topic_led_messages(request),
    }
}

/// Single user message, keywords drive the topic, Markdown output.
fn classic_messages(request: &GenerationRequest) -> Vec<ChatMessage> {
    let mut prompt = String::from("Genera un artículo completo y bien estructurado.");

    if request.editing_outline {
        prompt.push_str(
            " Primero, proporciona un esquema de edición detallado. \
             Luego, escribe el artículo basándote en ese esquema.",
        );
    }

    prompt.push_str(&format!(
        "\nPalabras clave: {}.\
         \nIntención de búsqueda: {}.\
         \nExtensión aproximada: {} palabras.\
         \nIdioma: {}.\
         \nTono y estilo: {}.",
        request.keywords_text(),
        request.search_intent_text(),
        request.word_count_text(),
        request.language_text(),
        request.tone_style_text(),
    ));

    if request.external_links {
        prompt.push_str("\nIncluye sugerencias de enlaces externos relevantes.");
    }
    if request.realtime_knowledge {
        // The model has no live internet access; this only nudges its style.
        prompt.push_str("\nUtiliza conocimiento general actualizado si es relevante para el tema.");
    }

    prompt.push_str(
        "\nEl artículo debe ser coherente, atractivo y cumplir con todas las \
         especificaciones. Formatea la respuesta en Markdown.",
    );

    vec![ChatMessage::user(prompt)]
}

/// System + user exchange. The article topic is the primary subject,
/// keywords are subordinate, word count is an upper bound, plain text out.
fn topic_led_messages(request: &GenerationRequest) -> Vec<ChatMessage> {
    let system = "Eres un redactor experto en SEO. Escribes artículos claros, \
                  coherentes y bien estructurados, en texto plano y sin formato Markdown.";

    let mut prompt = format!(
        "Escribe un artículo sobre el siguiente tema: {}.\
         \nLas palabras clave son secundarias al tema y deben integrarse de forma natural: {}.\
         \nIntención de búsqueda: {}.\
         \nExtensión máxima: {} palabras; no superes ese límite.\
         \nIdioma: {}.\
         \nTono y estilo: {}.",
        request.article_topic_text(),
        request.keywords_text(),
        request.search_intent_text(),
        request.word_count_text(),
        request.language_text(),
        request.tone_style_text(),
    );

    if request.editing_outline {
        prompt.push_str(
            "\nProporciona primero un esquema de edición y después el artículo completo.",
        );
    }
    if request.external_links {
        prompt.push_str("\nIncluye sugerencias de enlaces externos relevantes.");
    }
    if request.realtime_knowledge {
        prompt.push_str("\nUtiliza conocimiento general actualizado si es relevante para el tema.");
    }

    prompt.push_str("\nEntrega el artículo en texto plano.");

    vec![ChatMessage::system(system), ChatMessage::user(prompt)]
}
