// Extraction function schema and per-locale system instructions.
// The field vocabulary here is the contract shared with the template filler;
// see `models::record` for the deserialization side.

use serde_json::{json, Value};

use crate::locale::Locale;

pub fn system_instruction(locale: Locale) -> &'static str {
    match locale {
        Locale::Fr => "Tu es un assistant qui aide à extraire les informations des CV. \
                       Réponds uniquement via l'appel de fonction fourni.",
        Locale::En => "You are an assistant that extracts structured information from résumés. \
                       Respond only through the provided function call.",
    }
}

/// The `extract_cv_info` function definition sent with every call.
/// `TRI`, `ANNEE`, `TELEPHONE` and `EMAIL` are intentionally absent — they
/// are derived locally from the source text.
pub fn extract_cv_function() -> Value {
    json!({
        "name": "extract_cv_info",
        "description": "Extrait les informations structurées d'un CV.",
        "parameters": {
            "type": "object",
            "properties": {
                "PRENOM": { "type": "string", "description": "Prénom du candidat." },
                "NOM": { "type": "string", "description": "Nom du candidat." },
                "INTITULE_DU_POSTE": {
                    "type": "string",
                    "description": "L'intitulé du poste recherché."
                },
                "EXPERTISE": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Les activités et compétences spécifiques (par exemple, Etude de constructibilité, Résolution des problématiques, Leadership)."
                },
                "SECTEUR": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Les domaines principaux d'expertise (par exemple, Bâtiment, Industrie, Oil & Gas)."
                },
                "METHODOLOGIE": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Les méthodologies et outils maîtrisés (par exemple, Pack office, MS Project, Naviswork)."
                },
                "HABILITATION": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Les habilitations professionnelles spécifiques (par exemple, GIES 1/2, Elf Gabon HS3)."
                },
                "Projets effectués": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "CLIENT_NOM": { "type": "string", "description": "Nom du client." },
                            "DATE_DEBUT": { "type": "string", "description": "Date de début du projet." },
                            "DATE_FIN": { "type": "string", "description": "Date de fin du projet." },
                            "INTITULE_POSTE": { "type": "string", "description": "Intitulé du poste occupé." },
                            "INTITULE_PROJET": { "type": "string", "description": "Intitulé du projet réalisé." },
                            "DETAILS_PROJET": { "type": "string", "description": "Informations supplémentaires tel que le budget, les effectifs et les heures sans accident." },
                            "REALISATION": {
                                "type": "array",
                                "items": { "type": "string" },
                                "description": "Réalisations principales du projet."
                            }
                        },
                        "required": ["CLIENT_NOM", "DATE_DEBUT", "DATE_FIN", "INTITULE_POSTE", "INTITULE_PROJET", "REALISATION"]
                    }
                },
                "Diplômes": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "ANNEE_DIPLOME": { "type": "string", "description": "Année d'obtention du diplôme." },
                            "INTITULE_DIPLOME": { "type": "string", "description": "Intitulé complet du diplôme obtenu." }
                        },
                        "required": ["ANNEE_DIPLOME", "INTITULE_DIPLOME"]
                    }
                },
                "Langues": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "LANGUE": { "type": "string", "description": "Nom de la langue parlée." },
                            "NIVEAU": { "type": "string", "description": "Niveau de maîtrise de la langue (exemple : Courant, Intermédiaire)." }
                        },
                        "required": ["LANGUE", "NIVEAU"]
                    }
                },
                "Formations complémentaires": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "ANNEE_FORMATION": { "type": "string", "description": "Année de la formation complémentaire." },
                            "INTITULE_FORMATION": { "type": "string", "description": "Intitulé complet de la formation complémentaire." }
                        },
                        "required": ["ANNEE_FORMATION", "INTITULE_FORMATION"]
                    }
                }
            },
            "required": [
                "INTITULE_DU_POSTE", "EXPERTISE", "SECTEUR", "METHODOLOGIE", "HABILITATION",
                "Projets effectués", "Diplômes", "Langues", "Formations complémentaires"
            ]
        }
    })
}
