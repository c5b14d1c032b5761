use dashboard_core::{
    AppViewModel, ChatRole, ChatView, ClassifyState, DashboardView, DomainsView, ExportView,
    GraphView, HealthStatus, IngestionView, InputField, PageView, PipelineStatus, PipelineView,
    SearchResults, SearchView, Theme, ToastKind,
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::constants::{palette, Palette, APP_TITLE};
use super::keymap::UiState;
use super::layout;

const NO_FILTER: &str = "Tous";
const LOADING: &str = "Chargement...";

pub fn render(frame: &mut Frame, view: &AppViewModel, ui: &UiState) {
    let palette = palette(view.theme);
    frame.render_widget(
        Block::new().style(Style::new().fg(palette.text).bg(palette.background)),
        frame.area(),
    );

    let regions = layout::split(frame.area());
    render_header(frame, regions.header, view, palette);
    render_nav(frame, regions.nav, view, palette);
    match &view.page {
        Some(page) => render_page(frame, regions.page, page, view, ui, palette),
        // Unknown route: the frame stays, the page is empty.
        None => frame.render_widget(block("", palette), regions.page),
    }
    render_activity(frame, regions.activity, view, palette);
    render_toasts(frame, regions.toasts, view, palette);
}

fn block(title: &str, palette: Palette) -> Block<'_> {
    Block::bordered()
        .title(title)
        .border_style(Style::new().fg(palette.muted))
}

fn accent(palette: Palette) -> Style {
    Style::new().fg(palette.accent).add_modifier(Modifier::BOLD)
}

fn hint(text: &str, palette: Palette) -> Line<'_> {
    Line::styled(text, Style::new().fg(palette.muted))
}

fn input_line(label: &str, text: &str, focused: bool, palette: Palette) -> Line<'static> {
    let label_style = if focused {
        accent(palette)
    } else {
        Style::new().fg(palette.muted)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label}: "), label_style),
        Span::raw(format!("{text}{cursor}")),
    ])
}

fn filter_label(filter: Option<&str>) -> &str {
    filter.unwrap_or(NO_FILTER)
}

fn render_header(frame: &mut Frame, area: Rect, view: &AppViewModel, palette: Palette) {
    let theme = match view.theme {
        Theme::Light => "clair",
        Theme::Dark => "sombre",
    };
    let line = Line::from(vec![
        Span::styled(APP_TITLE, accent(palette)),
        Span::raw(format!("  #{}", view.location)),
        Span::raw(format!(
            "   Services: {}/{}",
            view.online_count, view.service_total
        )),
        Span::styled(format!("   Thème: {theme}"), Style::new().fg(palette.muted)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block("", palette)), area);
}

fn render_nav(frame: &mut Frame, area: Rect, view: &AppViewModel, palette: Palette) {
    let items: Vec<ListItem> = view
        .nav
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let text = format!("F{} {}", index + 1, item.label);
            let style = if item.active {
                accent(palette).add_modifier(Modifier::REVERSED)
            } else {
                Style::new()
            };
            ListItem::new(text).style(style)
        })
        .collect();
    frame.render_widget(List::new(items).block(block("Navigation", palette)), area);
}

fn render_page(
    frame: &mut Frame,
    area: Rect,
    page: &PageView,
    view: &AppViewModel,
    ui: &UiState,
    palette: Palette,
) {
    let title = view
        .nav
        .iter()
        .find(|item| item.page == page.page())
        .map_or("", |item| item.label);
    let outer = block(title, palette);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let (body, footer) = layout::split_bottom(inner, 1);
    let hint_text = match page {
        PageView::Dashboard(dashboard) => {
            render_dashboard(frame, body, dashboard, view, palette);
            "r actualiser la santé | Tab/F1-F8 pages | t thème | q quitter"
        }
        PageView::Ingestion(ingestion) => {
            render_ingestion(frame, body, ingestion, view, ui, palette);
            "f chemin | ↑↓ domaine | espace cocher | [ ] fichier | x retirer | l lot | Entrée ingérer"
        }
        PageView::Domains(domains) => {
            render_domains(frame, body, domains, view, ui, palette);
            "/ rechercher | Entrée appliquer | Échap quitter la saisie"
        }
        PageView::Pipeline(pipeline) => {
            render_pipeline(frame, body, pipeline, palette);
            "s démarrer/reprendre | p pause | x arrêter"
        }
        PageView::Graph(graph) => {
            render_graph(frame, body, graph, palette);
            "r actualiser | ←→ filtre domaine"
        }
        PageView::Chat(chat) => {
            render_chat(frame, body, chat, view, ui, palette);
            "c message | k classifier | Entrée envoyer | Échap quitter la saisie"
        }
        PageView::Search(search) => {
            render_search(frame, body, search, view, ui, palette);
            "/ requête | Entrée rechercher | ←→ filtre domaine"
        }
        PageView::Export(export) => {
            render_export(frame, body, export, palette);
            "←→ format | [ ] domaine | l lot | p aperçu | d télécharger"
        }
    };
    frame.render_widget(Paragraph::new(hint(hint_text, palette)), footer);
}

fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    dashboard: &DashboardView,
    view: &AppViewModel,
    palette: Palette,
) {
    let mut lines = match dashboard.stats {
        Some(stats) => vec![
            Line::from(format!("Documents: {}", stats.documents)),
            Line::from(format!("Nœuds du graphe: {}", stats.nodes)),
        ],
        None => vec![Line::from(LOADING)],
    };
    lines.push(Line::from(""));
    lines.push(Line::styled(
        format!(
            "Services en ligne: {}/{}",
            view.online_count, view.service_total
        ),
        accent(palette),
    ));
    for service in &view.services {
        let badge_style = match service.status {
            HealthStatus::Checking => Style::new().fg(palette.warning),
            HealthStatus::Online => Style::new().fg(palette.success),
            HealthStatus::Offline => Style::new().fg(palette.error),
        };
        lines.push(Line::from(vec![
            Span::raw(format!(
                "{} (:{}) {}  ",
                service.name, service.port, service.description
            )),
            Span::styled(service.status.badge(), badge_style),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_ingestion(
    frame: &mut Frame,
    area: Rect,
    ingestion: &IngestionView,
    view: &AppViewModel,
    ui: &UiState,
    palette: Palette,
) {
    let file_rows = u16::try_from(ingestion.files.len()).unwrap_or(u16::MAX);
    let [input, files, domains, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(file_rows.saturating_add(1).min(8)),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(input_line(
            "Chemin (ou glisser-déposer)",
            &view.inputs.file_path,
            ui.focus == Some(InputField::FilePath),
            palette,
        )),
        input,
    );

    let mut file_lines = vec![Line::styled(
        format!("Fichiers sélectionnés: {}", ingestion.files.len()),
        accent(palette),
    )];
    let cursor = ui
        .file_cursor
        .min(ingestion.files.len().saturating_sub(1));
    file_lines.extend(ingestion.files.iter().enumerate().map(|(index, file)| {
        let text = format!("  {}  {} KB", file.name, file.size_kb);
        if index == cursor {
            Line::styled(text, accent(palette).add_modifier(Modifier::REVERSED))
        } else {
            Line::from(text)
        }
    }));
    frame.render_widget(Paragraph::new(file_lines), files);

    let items: Vec<ListItem> = ingestion
        .domains
        .iter()
        .map(|domain| {
            let mark = if domain.checked { "[x]" } else { "[ ]" };
            ListItem::new(format!("{mark} {}", domain.label))
        })
        .collect();
    let mut cursor = ListState::default().with_selected(Some(ui.domain_cursor));
    frame.render_stateful_widget(
        List::new(items)
            .block(block("Domaines", palette))
            .highlight_style(accent(palette).add_modifier(Modifier::REVERSED)),
        domains,
        &mut cursor,
    );

    let (text, style) = if ingestion.in_flight {
        ("Ingestion en cours...", Style::new().fg(palette.warning))
    } else if ingestion.can_submit {
        ("Entrée: lancer l'ingestion", Style::new().fg(palette.success))
    } else {
        (
            "Sélectionnez des fichiers et au moins un domaine",
            Style::new().fg(palette.muted),
        )
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(format!("Lot: {}   ", ingestion.lot)),
            Span::styled(text, style),
        ])),
        status,
    );
}

fn render_domains(
    frame: &mut Frame,
    area: Rect,
    domains: &DomainsView,
    view: &AppViewModel,
    ui: &UiState,
    palette: Palette,
) {
    let mut lines = vec![
        input_line(
            "Recherche",
            &view.inputs.domain_search,
            ui.focus == Some(InputField::DomainSearch),
            palette,
        ),
        Line::from(""),
    ];
    if domains.total == 0 {
        lines.push(Line::from(LOADING));
    } else {
        lines.push(Line::styled(
            format!("{}/{} domaines", domains.cards.len(), domains.total),
            accent(palette),
        ));
        lines.extend(domains.cards.iter().map(|card| {
            Line::from(format!(
                "{}  {} documents · {} tags · {} relations",
                card.label, card.documents, card.tags, card.relations
            ))
        }));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_pipeline(frame: &mut Frame, area: Rect, pipeline: &PipelineView, palette: Palette) {
    let (status, style) = match pipeline.status {
        PipelineStatus::Idle => ("Inactif", Style::new().fg(palette.muted)),
        PipelineStatus::Running => ("En cours", Style::new().fg(palette.success)),
        PipelineStatus::Paused => ("En pause", Style::new().fg(palette.warning)),
    };
    let mut lines = vec![Line::from(vec![
        Span::raw("Statut: "),
        Span::styled(status, style),
    ])];
    lines.extend(pipeline.stages.iter().map(|stage| {
        let mark = if stage.completed { "[x]" } else { "[ ]" };
        Line::from(format!("{mark} {}", stage.stage.as_str()))
    }));
    lines.push(Line::from(""));

    let room = usize::from(area.height).saturating_sub(lines.len());
    let skip = pipeline.logs.len().saturating_sub(room);
    lines.extend(
        pipeline.logs[skip..]
            .iter()
            .map(|log| Line::styled(log.clone(), Style::new().fg(palette.muted))),
    );
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_graph(frame: &mut Frame, area: Rect, graph: &GraphView, palette: Palette) {
    let mut lines = vec![
        Line::from(format!(
            "Filtre domaine: {}",
            filter_label(graph.domain_filter.as_deref())
        )),
        Line::from(""),
    ];
    match graph.stats {
        Some(stats) => {
            lines.push(Line::styled("Statistiques du graphe", accent(palette)));
            lines.push(Line::from(format!("Nœuds: {}", stats.nodes)));
            lines.push(Line::from(format!("Relations: {}", stats.edges)));
            lines.push(Line::from(format!("Clusters: {}", stats.clusters)));
        }
        None => lines.push(Line::from(LOADING)),
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_chat(
    frame: &mut Frame,
    area: Rect,
    chat: &ChatView,
    view: &AppViewModel,
    ui: &UiState,
    palette: Palette,
) {
    let [history, inputs, classification] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(2),
        Constraint::Length(3),
    ])
    .areas(area);

    let lines: Vec<Line> = chat
        .messages
        .iter()
        .map(|message| {
            let (who, style) = match message.role {
                ChatRole::User => ("Vous", accent(palette)),
                ChatRole::Assistant => ("FastGPT", Style::new().fg(palette.success)),
            };
            Line::from(vec![
                Span::styled(format!("{who}: "), style),
                Span::raw(message.text.clone()),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block("Conversation", palette)),
        history,
    );

    frame.render_widget(
        Paragraph::new(vec![
            input_line(
                "Message",
                &view.inputs.chat_message,
                ui.focus == Some(InputField::ChatMessage),
                palette,
            ),
            input_line(
                "Texte à classifier",
                &view.inputs.classify_text,
                ui.focus == Some(InputField::ClassifyText),
                palette,
            ),
        ]),
        inputs,
    );

    let result = match &chat.classification {
        ClassifyState::Idle => Line::from(""),
        ClassifyState::Pending => Line::styled(
            "Classification en cours...",
            Style::new().fg(palette.warning),
        ),
        ClassifyState::Done(domains) => Line::from(vec![
            Span::styled("Domaines détectés: ", accent(palette)),
            Span::raw(domains.join(", ")),
        ]),
    };
    frame.render_widget(
        Paragraph::new(result).wrap(Wrap { trim: true }),
        classification,
    );
}

fn render_search(
    frame: &mut Frame,
    area: Rect,
    search: &SearchView,
    view: &AppViewModel,
    ui: &UiState,
    palette: Palette,
) {
    let mut lines = vec![
        input_line(
            "Requête",
            &view.inputs.search_query,
            ui.focus == Some(InputField::SearchQuery),
            palette,
        ),
        Line::from(format!(
            "Filtre domaine: {}",
            filter_label(search.domain_filter.as_deref())
        )),
        Line::from(""),
    ];
    match &search.results {
        SearchResults::Idle => {}
        SearchResults::Pending => lines.push(Line::styled(
            "Recherche en cours...",
            Style::new().fg(palette.warning),
        )),
        SearchResults::Ready(hits) => {
            for hit in hits {
                lines.push(Line::styled(hit.title.clone(), accent(palette)));
                lines.push(Line::from(hit.snippet.clone()));
                lines.push(Line::styled(
                    format!("{} · Score: {}", hit.domain, hit.score_label()),
                    Style::new().fg(palette.muted),
                ));
            }
        }
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_export(frame: &mut Frame, area: Rect, export: &ExportView, palette: Palette) {
    let [selectors, preview, history] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(4),
        Constraint::Length(6),
    ])
    .areas(area);

    let mut selector_lines = vec![Line::from(format!(
        "Format: {}   Domaine: {}   Lot: {}",
        export.format.as_str().to_uppercase(),
        filter_label(export.domain.as_deref()),
        filter_label(export.lot.as_deref()),
    ))];
    if export.downloading {
        selector_lines.push(Line::styled(
            "Téléchargement en cours...",
            Style::new().fg(palette.warning),
        ));
    }
    frame.render_widget(Paragraph::new(selector_lines), selectors);

    let preview_text = export.preview.clone().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(preview_text).block(block("Aperçu", palette)),
        preview,
    );

    let items: Vec<ListItem> = export
        .history
        .iter()
        .map(|format| ListItem::new(format!("Export {}", format.as_str().to_uppercase())))
        .collect();
    frame.render_widget(List::new(items).block(block("Historique", palette)), history);
}

fn render_activity(frame: &mut Frame, area: Rect, view: &AppViewModel, palette: Palette) {
    let items: Vec<ListItem> = view
        .activity
        .iter()
        .map(|line| ListItem::new(line.clone()))
        .collect();
    frame.render_widget(
        List::new(items).block(block("Activité récente", palette)),
        area,
    );
}

fn render_toasts(frame: &mut Frame, area: Rect, view: &AppViewModel, palette: Palette) {
    let items: Vec<ListItem> = view
        .toasts
        .iter()
        .rev()
        .map(|toast| {
            let color = match toast.kind {
                ToastKind::Info => palette.accent,
                ToastKind::Success => palette.success,
                ToastKind::Error => palette.error,
            };
            ListItem::new(toast.message.clone()).style(Style::new().fg(color))
        })
        .collect();
    frame.render_widget(List::new(items).block(block("Notifications", palette)), area);
}
