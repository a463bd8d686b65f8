//! Dealer layout: identity block and logo, client block, item table, a
//! details/summary footer, notes and signature lines.

use super::{Align, Block, Cell, Table};
use crate::calculations::Totals;
use crate::calculations::common::{format_amount, format_percent};
use crate::calculations::totals::vat_percent_label;
use crate::models::QuoteDocument;

const DEALER: [&str; 4] = [
    "BELOTTI MACCHINE AGRICOLE",
    "VIA SALETTI 3/F",
    "25040 - PLEMO DI ESINE (BS)",
    "Email: c39@me.com - Tel: 3462332866",
];

fn euro(value: rust_decimal::Decimal) -> String {
    format!("{}€", format_amount(value))
}

fn discount(value: rust_decimal::Decimal) -> String {
    format!("-{}€", format_amount(value))
}

pub(super) fn blocks(
    doc: &QuoteDocument,
    totals: &Totals,
) -> Vec<Block> {
    let client = &doc.client;

    let header = Block::Columns(vec![
        vec![
            Block::Logo {
                source: doc.company_logo.clone(),
            },
            Block::heading(DEALER[0]),
            Block::lines(DEALER[1..].iter().copied()),
        ],
        vec![
            Block::heading("PROPOSTA ORDINE").aligned(Align::Right),
            Block::lines([
                format!("Data: {}", doc.quote_date),
                format!("N° {}", doc.quote_number),
            ])
            .aligned(Align::Right),
        ],
    ]);

    let client_block = vec![
        Block::Section("CLIENTE".into()),
        Block::line(client.name.clone()).emphasized(),
        Block::lines([
            client.address.clone(),
            client.city.clone(),
            format!("Email: {} - Tel: {}", client.email, client.phone),
            format!("P.IVA: {} - C.F.: {}", client.vat_id, client.fiscal_code),
        ]),
    ];

    let items = Table {
        columns: 5,
        header: vec![
            Cell::new("Quantità"),
            Cell::new("Codice"),
            Cell::new("Descrizione"),
            Cell::new("Prezzo unitario").align(Align::Right),
            Cell::new("Totale").align(Align::Right),
        ],
        rows: doc
            .items
            .iter()
            .map(|item| {
                vec![
                    Cell::new(item.quantity.to_string()),
                    Cell::new(item.code.clone()),
                    Cell::new(item.description.clone()),
                    Cell::new(euro(item.unit_price)).align(Align::Right),
                    Cell::new(euro(item.total)).align(Align::Right),
                ]
            })
            .collect(),
        bordered: true,
    };

    let standard = format_percent(doc.standard_discount_percent);
    let extra = format_percent(doc.extra_discount_percent);

    let details = Table {
        columns: 2,
        header: Vec::new(),
        rows: vec![
            vec![Cell::new("Data Richiesta:"), Cell::new(doc.delivery_date.clone())],
            vec![Cell::new("Pagamento:"), Cell::new(doc.payment_method.clone())],
            vec![Cell::new("Sconto Standard:"), Cell::new(format!("{standard}%"))],
            vec![
                Cell::new("Sconto extra:"),
                Cell::new(format!("{extra}% {}", doc.campaign_name)),
            ],
            vec![
                Cell::new("Sconto Obiettivo:"),
                Cell::new(euro(doc.objective_discount_amount)),
            ],
        ],
        bordered: false,
    };

    let summary_row = |label: String, amount: String| {
        vec![Cell::new(label), Cell::new(amount).align(Align::Right)]
    };
    let bold_row = |label: &str, amount: String| {
        vec![
            Cell::new(label).bold(),
            Cell::new(amount).align(Align::Right).bold(),
        ]
    };
    let summary = Table {
        columns: 2,
        header: Vec::new(),
        rows: vec![
            summary_row("Prezzo totale di listino:".into(), euro(totals.subtotal)),
            summary_row(
                format!("Sconto Standard {standard}%:"),
                discount(totals.standard_discount_amount),
            ),
            summary_row(
                format!("Sconto extra {extra}%:"),
                discount(totals.extra_discount_amount),
            ),
            summary_row(
                "Sconto Obiettivo:".into(),
                discount(totals.objective_discount_amount),
            ),
            bold_row("Prezzo Netto:", euro(totals.net_total)),
            summary_row(format!("IVA {}%:", vat_percent_label()), euro(totals.vat)),
            bold_row("Totale ivato:", euro(totals.total_with_vat)),
        ],
        bordered: false,
    };

    let mut blocks = vec![header];
    blocks.extend(client_block);
    blocks.push(Block::Table(items));
    blocks.push(Block::Columns(vec![
        vec![Block::Section("DETTAGLI".into()), Block::Table(details)],
        vec![Block::Section("RIEPILOGO".into()), Block::Table(summary)],
    ]));
    blocks.push(Block::Section("NOTE".into()));
    blocks.push(Block::lines(doc.notes.lines()));
    blocks.push(Block::Signatures(vec![
        "Firma Concessionario".into(),
        "Timbro".into(),
    ]));
    blocks
}
