//! Table names, relation selects and fixed vocabularies

/// Ecclesiastical entities
pub const ENTITIES: &str = "entidadeeclesiastica";
/// Dioceses
pub const DIOCESES: &str = "diocese";
/// Clergy
pub const CLERGY: &str = "clero";
/// Entity photos
pub const PHOTOS: &str = "fotosentidade";

/// Entity with its diocese (and that diocese's titular bishop), rector and photos
pub const ENTITY_SELECT: &str = "*,\
diocese(id,nome,jurisdicao,loc_sede,bispo_titular:id_bispo_titular(id,nome_completo,titulo,email)),\
clero:id_reitor(id,nome_completo,titulo,email),\
fotosentidade(id,id_entidade,url_foto,legenda,ordem)";

/// Diocese with its titular and auxiliary bishops
pub const DIOCESE_SELECT: &str = "*,\
bispo_titular:id_bispo_titular(id,nome_completo,titulo,email),\
bispos_auxiliares:clero!id_diocese_auxiliar(id,nome_completo,titulo,email)";

/// Entity kinds accepted by the `tipo` column
pub const KIND_VALUES: [&str; 5] = ["Catedral", "Paroquia", "Mosteiro", "Missao", "Capela"];

/// Jurisdictions accepted by the `jurisdicao` column
pub const JURISDICTION_VALUES: [&str; 5] = [
    "PatriarcadoEcumenico",
    "PatriarcadoDeAntioquia",
    "PatriarcadoDeMoscou",
    "PatriarcadoDaServia",
    "IgrejaAutocefalaDaPolonia",
];

/// Columns searched by free-text search
pub const SEARCH_COLUMNS: [&str; 3] = ["nome", "cidade", "endereco"];

/// Maximum rows returned by a search
pub const SEARCH_LIMIT: usize = 20;
