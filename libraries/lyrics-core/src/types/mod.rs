mod album;
mod artist;
mod lyric;
mod records;
mod song;
mod user;

pub use album::{Album, AlbumId, CreateAlbum};
pub use artist::{Artist, ArtistId, CreateArtist, UpdateArtist};
pub use lyric::{CreateLyric, Lyric, LyricId, UpdateLyric};
pub use records::{AlbumRecord, LyricRecord, SongRecord};
pub use song::{CreateSong, Song, SongId};
pub use user::{CreateUser, User, UserId};
